//! Schema of the master service settings.
//!
//! Export sessions look up a few of these values directly, see
//! [`crate::ExportSession::import_environment`] and
//! [`crate::ExportSession::base_dir`].

use std::sync::LazyLock;

use crate::schema::{FieldSpec, Schema};

static MASTER_SERVICE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("master_service")
        .field(FieldSpec::string("base_dir", Some("/var/run/mail")))
        .field(FieldSpec::string("state_dir", Some("/var/lib/mail")))
        .field(FieldSpec::string("instance_name", Some("mail")))
        .field(FieldSpec::string("log_path", Some("syslog")))
        .field(FieldSpec::string("info_log_path", Some("")))
        .field(FieldSpec::string("debug_log_path", Some("")))
        .field(FieldSpec::string("log_timestamp", Some("%b %d %H:%M:%S ")))
        .field(FieldSpec::string("log_debug", Some("")))
        .field(FieldSpec::string("log_core_filter", Some("")))
        .field(FieldSpec::string("process_shutdown_filter", Some("")))
        .field(FieldSpec::string("syslog_facility", Some("mail")))
        .field(FieldSpec::string(
            "import_environment",
            Some("TZ CORE_OUTOFMEM CORE_ERROR LISTEN_PID LISTEN_FDS"),
        ))
        .field(FieldSpec::string(
            "stats_writer_socket_path",
            Some("stats-writer"),
        ))
        .field(FieldSpec::size("config_cache_size", 1024 * 1024))
        .field(FieldSpec::bool("version_ignore", false))
        .field(FieldSpec::bool("shutdown_clients", true))
        .field(FieldSpec::bool("verbose_proctitle", false))
        .field(FieldSpec::string("haproxy_trusted_networks", Some("")))
        .field(FieldSpec::duration("haproxy_timeout", 3))
        .build()
        .unwrap_or_else(|err| panic!("master_service schema: {err}"))
});

/// The process-wide master service schema.
#[must_use]
pub fn master_service_schema() -> &'static Schema {
    &MASTER_SERVICE
}
