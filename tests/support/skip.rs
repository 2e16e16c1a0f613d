/// Skip a test unless a real Azure environment is configured.
///
/// Needs the `AZURE_*` settings, `az` on PATH, and `AZURIFY_TEST_VAULT`
/// naming a vault the principal may write to.
#[macro_export]
macro_rules! skip_without_azure {
    () => {
        if std::env::var("AZURIFY_TEST_VAULT").is_err() {
            eprintln!("SKIPPED: AZURIFY_TEST_VAULT not set");
            return;
        }
        if which::which("az").is_err() {
            eprintln!("SKIPPED: az CLI not installed");
            return;
        }
    };
}
