//! Test fixtures and constants.

/// Records with a column missing from the first row and mixed value types.
pub const SAMPLE_RECORDS: &str = r#"[
    {"order": 1001, "customer": "Ada", "total": 19.5, "paid": true},
    {"order": 1002, "customer": "Linus", "total": 7, "paid": false, "note": "gift"},
    {"order": 1003, "customer": "Grace, Jr.", "total": 0.25}
]"#;

/// Secrets document with every recognized key plus one unknown key.
pub const SECRETS_DOCUMENT: &str = r#"{
    "SHOPDOMAIN": "mystore.myshopify.com",
    "APIVERSION": "2024-01",
    "APIACCESSTOKEN": "shpat_111",
    "APICLIENTSECRETKEY": "shpss_222",
    "AZSTORAGECONNSTR": "DefaultEndpointsProtocol=https;AccountName=acct;AccountKey=a2V5;EndpointSuffix=core.windows.net",
    "BOGUSKEY": "ignored"
}"#;

/// A complete, fake set of Azure settings.
pub const AZURE_ENV: &[(&str, &str)] = &[
    ("AZURE_SUBSCRIPTION_ID", "00000000-0000-0000-0000-000000000001"),
    ("AZURE_TENANT_ID", "00000000-0000-0000-0000-000000000002"),
    ("AZURE_CLIENT_ID", "00000000-0000-0000-0000-000000000003"),
    ("AZURE_CLIENT_SECRET", "not-a-real-secret"),
    ("AZURE_DEFAULT_GROUP_NAME", "rg-test"),
    ("AZURE_DEFAULT_LOCATION", "westeurope"),
    ("AZURE_DEFAULT_OBJECT_ID", "00000000-0000-0000-0000-000000000004"),
];

/// Lookup function over [`AZURE_ENV`] for `Settings::from_lookup`.
pub fn azure_lookup(name: &str) -> Option<String> {
    AZURE_ENV
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
}
