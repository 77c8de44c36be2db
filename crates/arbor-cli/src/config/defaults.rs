use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "arbor.config.json";

pub fn default_entry_point() -> String {
    "app.tsx".to_string()
}

pub fn default_routes() -> Vec<PathBuf> {
    vec![PathBuf::from("routes")]
}

pub fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

pub fn default_bundler_command() -> Vec<String> {
    vec!["esbuild".to_string()]
}

pub fn default_formatter_enabled() -> bool {
    true
}

pub fn default_formatter_command() -> Vec<String> {
    ["deno", "fmt", "--ext", arbor_routes::format::EXT_PLACEHOLDER, "-"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn default_client_runtime() -> String {
    "@arbor/app".to_string()
}

pub fn default_server_runtime() -> String {
    "@arbor/app/server".to_string()
}

pub fn default_view_router() -> String {
    "react-router-dom".to_string()
}

pub fn default_server_router() -> String {
    "@oak/oak".to_string()
}

pub fn default_dev_port() -> u16 {
    9002
}

pub fn default_app_command() -> Vec<String> {
    ["deno", "run", "-A", "./main.ts"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn default_debounce_ms() -> u64 {
    20
}
