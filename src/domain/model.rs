use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Markup flavor the rendered text must conform to. Decides which escaper
/// runs and which `parse_mode` goes out with each chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    MarkdownV2,
    Html,
}

impl Dialect {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "MarkdownV2" | "markdownv2" | "markdown" => Some(Self::MarkdownV2),
            "HTML" | "html" => Some(Self::Html),
            _ => None,
        }
    }

    /// Value of the Bot API `parse_mode` field.
    pub fn parse_mode(self) -> &'static str {
        match self {
            Self::MarkdownV2 => "MarkdownV2",
            Self::Html => "HTML",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub qty: u32,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_amount_opt")]
    pub subtotal: Option<f64>,
}

impl LineItem {
    /// Explicit subtotal when the client sent one, `qty × price` otherwise.
    pub fn subtotal(&self) -> f64 {
        self.subtotal.unwrap_or(f64::from(self.qty) * self.price)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cycle {
    #[default]
    Monthly,
    Yearly,
}

impl Cycle {
    /// Uzbek cycle label used in the rendered message.
    pub fn label(self) -> &'static str {
        match self {
            Self::Monthly => "oy",
            Self::Yearly => "yil",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub cycle: Cycle,
    #[serde(default, rename = "priceUZS", deserialize_with = "lenient_amount")]
    pub price_uzs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Install {
    #[serde(default, rename = "feeUZS", deserialize_with = "lenient_amount")]
    pub fee_uzs: f64,
    #[serde(default)]
    pub cycle: Cycle,
    #[serde(default, rename = "planId")]
    pub plan_id: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmission {
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total: f64,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub install: Option<Install>,
    #[serde(
        default,
        rename = "grandFirstPaymentUZS",
        deserialize_with = "lenient_amount_opt"
    )]
    pub grand_first_payment_uzs: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
    /// RFC 3339 string or epoch milliseconds; anything else falls back
    /// to the receipt time at render.
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<Value>,
}

impl OrderSubmission {
    pub fn grand_first_payment(&self) -> f64 {
        self.grand_first_payment_uzs.unwrap_or_else(|| {
            self.total
                + self.plan.as_ref().map_or(0.0, |p| p.price_uzs)
                + self.install.as_ref().map_or(0.0, |i| i.fee_uzs)
        })
    }

    pub fn install_fee(&self) -> f64 {
        self.install.as_ref().map_or(0.0, |i| i.fee_uzs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

/// One fully rendered message plus the dialect it was rendered for.
/// Produced once per request and handed straight to the chunker.
#[derive(Debug, Clone)]
pub struct RenderedMessage {
    pub text: String,
    pub dialect: Dialect,
}

/// Per (chat, chunk-index) delivery record. The serialized shape is the
/// row format of the 502 `details` list.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryOutcome {
    pub chat_id: String,
    pub chunk: usize,
    #[serde(rename = "httpOk")]
    pub http_ok: bool,
    #[serde(rename = "tgOk")]
    pub tg_ok: bool,
    pub body: Value,
}

impl DeliveryOutcome {
    pub fn accepted(&self) -> bool {
        self.http_ok && self.tg_ok
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeliveryReport {
    pub outcomes: Vec<DeliveryOutcome>,
}

impl DeliveryReport {
    pub fn all_ok(&self) -> bool {
        self.outcomes.iter().all(DeliveryOutcome::accepted)
    }
}

fn coerce_amount(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    }
}

/// `Number(x || 0)` tolerance: numbers pass through, numeric strings
/// parse, everything else is zero.
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_amount(value.as_ref()))
}

fn lenient_amount_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(coerce_amount(Some(&v))),
    })
}
