//! Loading `ExportOptions` from files and the environment.

use anyhow::{Result, anyhow, ensure};
use config_export::{ExportError, ExportFlags, ExportOptions, ExportScope};
use rstest::rstest;
use test_helpers::figment::load_in_jail;

#[rstest]
fn defaults_apply_without_providers() -> Result<()> {
    let options = load_in_jail(None, |_| Ok(()))??;
    ensure!(options == ExportOptions::default(), "unexpected {options:?}");
    ensure!(
        options.scope == ExportScope::AllWithoutHidden,
        "default scope"
    );
    Ok(())
}

#[rstest]
#[case("all_with_hidden", ExportScope::AllWithHidden)]
#[case("all_without_hidden", ExportScope::AllWithoutHidden)]
#[case("set_only", ExportScope::SetOnly)]
#[case("changed_only", ExportScope::ChangedOnly)]
fn scope_is_read_from_the_environment(
    #[case] raw: &'static str,
    #[case] expected: ExportScope,
) -> Result<()> {
    let options = load_in_jail(None, |jail| {
        jail.set_env("CONFIG_EXPORT_SCOPE", raw);
        Ok(())
    })??;
    ensure!(options.scope == expected, "{raw} loaded as {:?}", options.scope);
    Ok(())
}

#[rstest]
fn nested_flags_use_double_underscores() -> Result<()> {
    let options = load_in_jail(None, |jail| {
        jail.set_env("CONFIG_EXPORT_FLAGS__DEDUPLICATE_KEYS", "true");
        Ok(())
    })??;
    ensure!(
        options.flags == ExportFlags::default().deduplicate_keys(),
        "unexpected flags {:?}",
        options.flags
    );
    Ok(())
}

#[rstest]
fn environment_overrides_the_file() -> Result<()> {
    let options = load_in_jail(Some("export.toml"), |jail| {
        jail.create_file(
            "export.toml",
            "scope = \"changed_only\"\n\n[flags]\nhide_list_defaults = true\n",
        )?;
        jail.set_env("CONFIG_EXPORT_SCOPE", "set_only");
        Ok(())
    })??;
    ensure!(options.scope == ExportScope::SetOnly, "env should win");
    ensure!(options.flags.hide_list_defaults, "file flag kept");
    ensure!(!options.flags.deduplicate_keys, "unset flag stays off");
    Ok(())
}

#[rstest]
fn unknown_scope_is_rejected() -> Result<()> {
    let loaded = load_in_jail(None, |jail| {
        jail.set_env("CONFIG_EXPORT_SCOPE", "everything");
        Ok(())
    })?;
    match loaded {
        Err(ExportError::Options(err)) => {
            ensure!(
                err.to_string().contains("everything"),
                "error should name the bad value: {err}"
            );
            Ok(())
        }
        Err(other) => Err(anyhow!("unexpected error {other}")),
        Ok(options) => Err(anyhow!("expected failure, loaded {options:?}")),
    }
}
