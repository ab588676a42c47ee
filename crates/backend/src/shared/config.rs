use serde::Deserialize;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub email: EmailConfig,
    pub orders: OrderConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the storefront (index.html, script.js, ...)
    pub static_dir: String,
}

/// Where the product spreadsheet lives and how to read it
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogConfig {
    pub source_url: String,
    pub sheet_name: String,
    pub has_header: bool,
    /// Zero-based column with the product name
    pub product_col: usize,
    /// Zero-based column with the price
    pub price_col: usize,
    pub cache_ttl_seconds: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub address: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OrderConfig {
    pub number_prefix: String,
    pub shop_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: "public".to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source_url: String::new(),
            sheet_name: "Sheet1".to_string(),
            has_header: false,
            product_col: 0,
            price_col: 1,
            cache_ttl_seconds: 300,
            request_timeout_secs: 30,
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            address: None,
            password: None,
            timeout_secs: 30,
        }
    }
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            number_prefix: "THO".to_string(),
            shop_name: "Thottam Organics".to_string(),
        }
    }
}

impl EmailConfig {
    /// Mail is sent only when both the account address and password are set
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.address.as_deref(), self.password.as_deref()) {
            (Some(a), Some(p)) if !a.is_empty() && !p.is_empty() => Some((a, p)),
            _ => None,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 5000
static_dir = "public"

[catalog]
source_url = ""
sheet_name = "Sheet1"
has_header = false
product_col = 0
price_col = 1
cache_ttl_seconds = 300
request_timeout_secs = 30

[email]
smtp_server = "smtp.gmail.com"
smtp_port = 587
timeout_secs = 30

[orders]
number_prefix = "THO"
shop_name = "Thottam Organics"
"#;

/// Load configuration
///
/// Search order for config.toml:
/// 1. `CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Next to the executable
/// 4. Falls back to embedded default config
///
/// Environment variables (also read from `.env`) override file values.
pub fn load_config() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let mut config = match find_config_file() {
        Some(path) => {
            tracing::info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str::<Config>(&contents)?
        }
        None => {
            tracing::info!("Using default embedded configuration");
            toml::from_str::<Config>(DEFAULT_CONFIG)?
        }
    };

    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CONFIG_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
        tracing::warn!("CONFIG_PATH points to a missing file: {}", path.display());
    }

    let local = PathBuf::from("config.toml");
    if local.exists() {
        return Some(local);
    }

    let exe_path = std::env::current_exe().ok()?;
    let beside_exe = exe_path.parent()?.join("config.toml");
    if beside_exe.exists() {
        Some(beside_exe)
    } else {
        tracing::warn!("config.toml not found at: {}", beside_exe.display());
        None
    }
}

impl Config {
    /// Applies the environment variables the deployment uses
    /// (`PRODUCT_SHEET_URL`, `HAS_HEADER`, `SMTP_PORT`, ...).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        set_string(&lookup, "HOST", &mut self.server.host);
        parse_var(&lookup, "PORT", &mut self.server.port)?;
        set_string(&lookup, "STATIC_DIR", &mut self.server.static_dir);

        set_string(&lookup, "PRODUCT_SHEET_URL", &mut self.catalog.source_url);
        set_string(&lookup, "SHEET_NAME", &mut self.catalog.sheet_name);
        if let Some(raw) = lookup("HAS_HEADER") {
            self.catalog.has_header = raw.trim().to_lowercase() == "true";
        }
        parse_var(&lookup, "PRODUCT_COL", &mut self.catalog.product_col)?;
        parse_var(&lookup, "PRICE_COL", &mut self.catalog.price_col)?;
        parse_var(&lookup, "CACHE_TTL_SECONDS", &mut self.catalog.cache_ttl_seconds)?;

        set_string(&lookup, "SMTP_SERVER", &mut self.email.smtp_server);
        parse_var(&lookup, "SMTP_PORT", &mut self.email.smtp_port)?;
        if let Some(address) = lookup("EMAIL_ADDRESS") {
            self.email.address = Some(address.trim().to_string()).filter(|a| !a.is_empty());
        }
        if let Some(password) = lookup("EMAIL_PASSWORD") {
            self.email.password = Some(password).filter(|p| !p.is_empty());
        }

        set_string(&lookup, "ORDER_PREFIX", &mut self.orders.number_prefix);
        set_string(&lookup, "SHOP_NAME", &mut self.orders.shop_name);
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }
        if self.catalog.request_timeout_secs == 0 {
            anyhow::bail!("Catalog request timeout must be greater than 0");
        }
        if self.orders.number_prefix.trim().is_empty() {
            anyhow::bail!("Order number prefix cannot be empty");
        }
        Ok(())
    }
}

fn set_string<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, target: &mut String) {
    if let Some(value) = lookup(key) {
        *target = value.trim().to_string();
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, target: &mut T) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    if let Some(raw) = lookup(key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {} value '{}': {}", key, raw, e))?;
    }
    Ok(())
}
