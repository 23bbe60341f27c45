//! Product configuration: everything the retailer typed in about one PC.
//!
//! This is the boundary type supplied by the external configuration store.
//! Every field has a default, so a partial JSON document deserializes and
//! the builders decide what to omit.

use serde::{Deserialize, Serialize};

use super::theme::ThemeSelection;

/// Component category shown in the spec list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecCategory {
    Cpu,
    Gpu,
    Ram,
    Storage,
    Motherboard,
    Psu,
    Case,
    Cooling,
}

impl SpecCategory {
    /// All eight categories in display order.
    pub const ALL: [SpecCategory; 8] = [
        SpecCategory::Cpu,
        SpecCategory::Gpu,
        SpecCategory::Ram,
        SpecCategory::Storage,
        SpecCategory::Motherboard,
        SpecCategory::Psu,
        SpecCategory::Case,
        SpecCategory::Cooling,
    ];

    /// The four headline categories that fit on a shelf tag.
    pub const HEADLINE: [SpecCategory; 4] = [
        SpecCategory::Cpu,
        SpecCategory::Gpu,
        SpecCategory::Ram,
        SpecCategory::Storage,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SpecCategory::Cpu => "cpu",
            SpecCategory::Gpu => "gpu",
            SpecCategory::Ram => "ram",
            SpecCategory::Storage => "storage",
            SpecCategory::Motherboard => "motherboard",
            SpecCategory::Psu => "psu",
            SpecCategory::Case => "case",
            SpecCategory::Cooling => "cooling",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpecCategory::Cpu => "CPU",
            SpecCategory::Gpu => "GPU",
            SpecCategory::Ram => "RAM",
            SpecCategory::Storage => "Storage",
            SpecCategory::Motherboard => "Motherboard",
            SpecCategory::Psu => "PSU",
            SpecCategory::Case => "Case",
            SpecCategory::Cooling => "Cooling",
        }
    }
}

/// Free-text component values, one per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecValues {
    pub cpu: String,
    pub gpu: String,
    pub ram: String,
    pub storage: String,
    pub motherboard: String,
    pub psu: String,
    pub case: String,
    pub cooling: String,
}

impl SpecValues {
    /// The value for one category.
    pub fn get(&self, category: SpecCategory) -> &str {
        match category {
            SpecCategory::Cpu => &self.cpu,
            SpecCategory::Gpu => &self.gpu,
            SpecCategory::Ram => &self.ram,
            SpecCategory::Storage => &self.storage,
            SpecCategory::Motherboard => &self.motherboard,
            SpecCategory::Psu => &self.psu,
            SpecCategory::Case => &self.case,
            SpecCategory::Cooling => &self.cooling,
        }
    }
}

fn default_badge_text() -> String {
    "SALE".to_string()
}

/// Sale settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleInfo {
    pub enabled: bool,
    /// Pre-sale price; 0 means unknown.
    pub original_price: f64,
    /// Badge label, e.g. "SALE" or "CLEARANCE".
    pub badge_text: String,
}

impl Default for SaleInfo {
    fn default() -> Self {
        Self {
            enabled: false,
            original_price: 0.0,
            badge_text: default_badge_text(),
        }
    }
}

/// Financing offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingInfo {
    pub enabled: bool,
    pub months: u32,
    /// Annual percentage rate, e.g. `9.99`.
    pub apr: f64,
}

impl Default for FinancingInfo {
    fn default() -> Self {
        Self {
            enabled: false,
            months: 12,
            apr: 0.0,
        }
    }
}

/// Item condition; each maps to a fixed badge label and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    New,
    Refurbished,
    Used,
    OpenBox,
}

impl Condition {
    /// `(label, background color)` for the condition badge.
    pub fn style(self) -> (&'static str, &'static str) {
        match self {
            Condition::New => ("NEW", "#16a34a"),
            Condition::Refurbished => ("REFURBISHED", "#2563eb"),
            Condition::Used => ("USED", "#d97706"),
            Condition::OpenBox => ("OPEN BOX", "#7c3aed"),
        }
    }
}

/// Stock availability; each maps to a fixed badge label and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
    PreOrder,
}

impl StockStatus {
    /// `(label, background color)` for the stock badge.
    pub fn style(self) -> (&'static str, &'static str) {
        match self {
            StockStatus::InStock => ("IN STOCK", "#16a34a"),
            StockStatus::LowStock => ("LOW STOCK", "#f59e0b"),
            StockStatus::OutOfStock => ("OUT OF STOCK", "#dc2626"),
            StockStatus::PreOrder => ("PRE-ORDER", "#2563eb"),
        }
    }
}

fn default_background() -> String {
    "#ffffff".to_string()
}

fn default_font_family() -> String {
    "Helvetica".to_string()
}

/// Full description of one prebuilt PC.
///
/// ## Example (JSON)
///
/// ```json
/// {
///   "store_name": "Circuit City Labs",
///   "model_name": "Nebula RTX Gaming PC",
///   "price": 1299.99,
///   "specs": {"cpu": "AMD Ryzen 7 7800X3D", "gpu": "NVIDIA RTX 4070 Super"},
///   "sale": {"enabled": true, "original_price": 1499.99},
///   "sku": "NEB-4070-01"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductConfig {
    pub store_name: String,
    /// Logo source: data URL, file path or http(s) URL.
    pub logo: Option<String>,
    pub model_name: String,
    pub description: String,
    pub specs: SpecValues,
    pub price: f64,
    pub sale: SaleInfo,
    pub financing: FinancingInfo,
    pub features: Vec<String>,
    pub condition: Option<Condition>,
    pub build_tier: String,
    pub stock_status: Option<StockStatus>,
    pub os: String,
    pub warranty: String,
    pub connectivity: String,
    /// Product photo source: data URL, file path or http(s) URL.
    pub product_image: Option<String>,
    /// URL encoded into the QR code.
    pub qr_url: String,
    pub sku: String,
    pub theme: ThemeSelection,
    pub background_color: String,
    pub background_pattern: Option<String>,
    pub font_family: String,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            store_name: String::new(),
            logo: None,
            model_name: String::new(),
            description: String::new(),
            specs: SpecValues::default(),
            price: 0.0,
            sale: SaleInfo::default(),
            financing: FinancingInfo::default(),
            features: Vec::new(),
            condition: None,
            build_tier: String::new(),
            stock_status: None,
            os: String::new(),
            warranty: String::new(),
            connectivity: String::new(),
            product_image: None,
            qr_url: String::new(),
            sku: String::new(),
            theme: ThemeSelection::default(),
            background_color: default_background(),
            background_pattern: None,
            font_family: default_font_family(),
        }
    }
}

impl ProductConfig {
    /// Model name with the friendly fallback for an empty field.
    pub fn display_name(&self) -> &str {
        let name = self.model_name.trim();
        if name.is_empty() { "PC Build" } else { name }
    }

    /// A sample configuration with every section filled in.
    pub fn sample() -> Self {
        Self {
            store_name: "Circuit City Labs".into(),
            model_name: "Nebula RTX Gaming PC".into(),
            description: "Tuned for 1440p high-refresh gaming and streaming, assembled and \
                          stress-tested in store."
                .into(),
            specs: SpecValues {
                cpu: "AMD Ryzen 7 7800X3D".into(),
                gpu: "NVIDIA GeForce RTX 4070 Super 12GB".into(),
                ram: "32GB DDR5-6000".into(),
                storage: "2TB NVMe Gen4 SSD".into(),
                motherboard: "MSI B650 Tomahawk WiFi".into(),
                psu: "Corsair RM850e 850W Gold".into(),
                case: "Lian Li Lancool 216".into(),
                cooling: "Noctua NH-D15 Air Cooler".into(),
            },
            price: 1299.99,
            sale: SaleInfo {
                enabled: true,
                original_price: 1499.99,
                badge_text: "SALE".into(),
            },
            financing: FinancingInfo {
                enabled: true,
                months: 12,
                apr: 9.99,
            },
            features: vec![
                "WiFi 6E".into(),
                "RGB Lighting".into(),
                "Tempered Glass".into(),
                "USB-C".into(),
                "Bluetooth 5.3".into(),
                "VR Ready".into(),
                "Quiet Fans".into(),
            ],
            condition: Some(Condition::New),
            build_tier: "Performance".into(),
            stock_status: Some(StockStatus::InStock),
            os: "Windows 11 Home".into(),
            warranty: "2 Year Parts & Labor".into(),
            connectivity: "WiFi 6E + BT 5.3".into(),
            qr_url: "https://example.com/nebula".into(),
            sku: "NEB-4070-01".into(),
            ..Default::default()
        }
    }
}
