//! Fixture schemas and settings trees.
//!
//! The schemas describe a trimmed mail server configuration: a `mail`
//! module holding uniquely named services, each with named inet and unix
//! listeners. Builders return [`SettingsParser`]s ready to be nested or
//! wrapped in a [`ModuleParser`].

use std::sync::LazyLock;

use config_export::{
    FieldSpec, ModuleParser, ScalarValue, Schema, SchemaError, SettingValue, SettingsParser,
    master::master_service_schema,
};

/// Schema of a network listener, named by `name`.
pub static INET_LISTENER: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("inet_listener")
        .field(FieldSpec::string("name", None))
        .field(FieldSpec::string("address", Some("")))
        .field(FieldSpec::port("port", 0))
        .field(FieldSpec::bool("ssl", false))
        .field(FieldSpec::bool("haproxy", false))
        .name_field("name")
        .build()
        .unwrap_or_else(|err| panic!("inet_listener schema: {err}"))
});

/// Schema of a unix socket listener, named by its `path`.
pub static UNIX_LISTENER: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("unix_listener")
        .field(FieldSpec::string("path", None))
        .field(FieldSpec::octal("mode", 0o600))
        .field(FieldSpec::string("user", Some("")))
        .name_field("path")
        .build()
        .unwrap_or_else(|err| panic!("unix_listener schema: {err}"))
});

/// Schema of one service block.
pub static SERVICE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("service")
        .field(FieldSpec::string("name", None))
        .field(FieldSpec::string("protocol", Some("")))
        .field(FieldSpec::string("executable", Some("")))
        .field(FieldSpec::uint("process_limit", 0))
        .field(FieldSpec::alias("processes", "process_limit"))
        .field(FieldSpec::size("vsz_limit", 256 * 1024 * 1024))
        .field(FieldSpec::duration("idle_kill", 60))
        .field(FieldSpec::unique_section_list("inet_listener", &INET_LISTENER))
        .field(FieldSpec::unique_section_list("unix_listener", &UNIX_LISTENER))
        .name_field("name")
        .build()
        .unwrap_or_else(|err| panic!("service schema: {err}"))
});

/// Root schema of the `mail` module.
pub static MAIL: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("mail")
        .field(FieldSpec::string("protocols", Some("imap pop3 lmtp")))
        .field(FieldSpec::expandable("mail_location", Some("")))
        .field(FieldSpec::enumeration("mail_fsync", "optimized:always:never"))
        .field(FieldSpec::duration("mailbox_idle_check_interval", 30))
        .field(FieldSpec::duration_ms("dict_timeout", 30_000))
        .field(FieldSpec::octal("umask", 0o077))
        .field(FieldSpec::bool("mail_debug", false).hidden())
        .field(FieldSpec::str_map("plugin"))
        .field(FieldSpec::unique_section_list("service", &SERVICE))
        .build()
        .unwrap_or_else(|err| panic!("mail schema: {err}"))
});

fn must<T>(result: Result<T, SchemaError>, what: &str) -> T {
    result.unwrap_or_else(|err| panic!("{what}: {err}"))
}

/// An inet listener with its name and port set.
#[must_use]
pub fn inet_listener(name: &str, port: u16) -> SettingsParser {
    let mut parser = SettingsParser::new(&INET_LISTENER);
    must(parser.set("name", ScalarValue::string(name)), "listener name");
    must(parser.set("port", ScalarValue::Port(port)), "listener port");
    parser
}

/// A unix listener with its path set.
#[must_use]
pub fn unix_listener(path: &str) -> SettingsParser {
    let mut parser = SettingsParser::new(&UNIX_LISTENER);
    must(parser.set("path", ScalarValue::string(path)), "listener path");
    parser
}

/// A service with its name set and the given listeners attached.
#[must_use]
pub fn service(name: &str, inet: Vec<SettingsParser>, unix: Vec<SettingsParser>) -> SettingsParser {
    let mut parser = SettingsParser::new(&SERVICE);
    must(parser.set("name", ScalarValue::string(name)), "service name");
    for listener in inet {
        must(parser.add_section("inet_listener", listener), "inet listener");
    }
    for listener in unix {
        must(parser.add_section("unix_listener", listener), "unix listener");
    }
    parser
}

/// The `mail` module as a typical configuration file would leave it.
///
/// `protocols`, `mail_location` and one plugin entry are set; the `imap`
/// service listens on 143 and 993 and the `lmtp` service on a socket.
#[must_use]
pub fn mail_settings() -> SettingsParser {
    let mut imaps = inet_listener("imaps", 993);
    must(imaps.set("ssl", ScalarValue::Bool(true)), "imaps ssl");
    let imap = service("imap", vec![inet_listener("imap", 143), imaps], Vec::new());
    let lmtp = service("lmtp", Vec::new(), vec![unix_listener("lmtp")]);

    let mut mail = SettingsParser::new(&MAIL);
    must(
        mail.set("protocols", ScalarValue::string("imap lmtp")),
        "protocols",
    );
    must(
        mail.set("mail_location", ScalarValue::unexpanded("maildir:~/Maildir")),
        "mail_location",
    );
    must(mail.insert_map_entry("plugin", "quota", "maildir"), "plugin");
    must(mail.add_section("service", imap), "imap service");
    must(mail.add_section("service", lmtp), "lmtp service");
    mail
}

/// The master service module with `base_dir` overridden.
#[must_use]
pub fn master_settings(base_dir: &str) -> SettingsParser {
    let mut master = SettingsParser::new(master_service_schema());
    must(master.set("base_dir", ScalarValue::string(base_dir)), "base_dir");
    master
}

/// A module whose string map was created but holds no entries.
#[must_use]
pub fn empty_plugin_module() -> ModuleParser {
    let mut mail = SettingsParser::new(&MAIL);
    must(
        mail.set("plugin", SettingValue::StringMap(Some(Vec::new()))),
        "plugin",
    );
    ModuleParser::new(mail)
}
