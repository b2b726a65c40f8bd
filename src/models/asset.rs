use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    UsEquity,
    NigerianEquity,
    Crypto,
}

impl AssetClass {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "us_equity" | "us" | "us_stocks" => Some(Self::UsEquity),
            "nigerian_equity" | "ng" | "nigerian_stocks" => Some(Self::NigerianEquity),
            "crypto" | "cryptos" => Some(Self::Crypto),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Ngn,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Ngn => "₦",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub display_name: String,
    pub ticker: String,
    pub class: AssetClass,
    pub currency: Currency,
}

impl AssetEntry {
    fn new(display_name: &str, ticker: &str, class: AssetClass, currency: Currency) -> Self {
        Self {
            display_name: display_name.to_string(),
            ticker: ticker.to_string(),
            class,
            currency,
        }
    }

    pub fn currency_symbol(&self) -> &'static str {
        self.currency.symbol()
    }
}

/// The fixed set of assets the dashboard can chart, in menu order.
pub struct AssetCatalog {
    entries: Vec<AssetEntry>,
    by_ticker: HashMap<String, usize>,
}

impl AssetCatalog {
    pub fn new(entries: Vec<AssetEntry>) -> Self {
        let by_ticker = entries
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.ticker.to_uppercase(), idx))
            .collect();
        Self { entries, by_ticker }
    }

    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    /// Ticker lookup, case-insensitive.
    pub fn get(&self, ticker: &str) -> Option<&AssetEntry> {
        self.by_ticker
            .get(&ticker.to_uppercase())
            .map(|&idx| &self.entries[idx])
    }

    pub fn by_display_name(&self, name: &str) -> Option<&AssetEntry> {
        self.entries.iter().find(|e| e.display_name == name)
    }

    pub fn by_class(&self, class: AssetClass) -> Vec<&AssetEntry> {
        self.entries.iter().filter(|e| e.class == class).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Process-wide catalog, built on first use.
pub fn catalog() -> &'static AssetCatalog {
    static CATALOG: OnceLock<AssetCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| AssetCatalog::new(default_entries()))
}

fn default_entries() -> Vec<AssetEntry> {
    use AssetClass::*;
    use Currency::*;

    vec![
        // US stocks
        AssetEntry::new("Apple (AAPL)", "AAPL", UsEquity, Usd),
        AssetEntry::new("Tesla (TSLA)", "TSLA", UsEquity, Usd),
        AssetEntry::new("Microsoft (MSFT)", "MSFT", UsEquity, Usd),
        AssetEntry::new("Amazon (AMZN)", "AMZN", UsEquity, Usd),
        AssetEntry::new("Google (GOOGL)", "GOOGL", UsEquity, Usd),
        AssetEntry::new("NVIDIA (NVDA)", "NVDA", UsEquity, Usd),
        AssetEntry::new("Meta (META)", "META", UsEquity, Usd),
        AssetEntry::new("Netflix (NFLX)", "NFLX", UsEquity, Usd),
        AssetEntry::new("JPMorgan Chase (JPM)", "JPM", UsEquity, Usd),
        AssetEntry::new("Chevron (CVX)", "CVX", UsEquity, Usd),
        AssetEntry::new("Coca-Cola (KO)", "KO", UsEquity, Usd),
        AssetEntry::new("Walmart (WMT)", "WMT", UsEquity, Usd),
        AssetEntry::new("Disney (DIS)", "DIS", UsEquity, Usd),
        // Nigerian Exchange
        AssetEntry::new("GTCO (GTCO.LG)", "GTCO.LG", NigerianEquity, Ngn),
        AssetEntry::new("Zenith Bank (ZENITHBANK.LG)", "ZENITHBANK.LG", NigerianEquity, Ngn),
        AssetEntry::new("Access Holdings (ACCESSCORP.LG)", "ACCESSCORP.LG", NigerianEquity, Ngn),
        AssetEntry::new("UBA (UBA.LG)", "UBA.LG", NigerianEquity, Ngn),
        AssetEntry::new("MTN Nigeria (MTNN.LG)", "MTNN.LG", NigerianEquity, Ngn),
        AssetEntry::new("Dangote Cement (DANGCEM.LG)", "DANGCEM.LG", NigerianEquity, Ngn),
        AssetEntry::new("Nestle Nigeria (NESTLE.LG)", "NESTLE.LG", NigerianEquity, Ngn),
        AssetEntry::new("Seplat Energy (SEPLAT.LG)", "SEPLAT.LG", NigerianEquity, Ngn),
        // Crypto, quoted in USD
        AssetEntry::new("Bitcoin (BTC-USD)", "BTC-USD", Crypto, Usd),
        AssetEntry::new("Ethereum (ETH-USD)", "ETH-USD", Crypto, Usd),
        AssetEntry::new("Solana (SOL-USD)", "SOL-USD", Crypto, Usd),
        AssetEntry::new("Binance Coin (BNB-USD)", "BNB-USD", Crypto, Usd),
        AssetEntry::new("Cardano (ADA-USD)", "ADA-USD", Crypto, Usd),
        AssetEntry::new("XRP (XRP-USD)", "XRP-USD", Crypto, Usd),
        AssetEntry::new("Dogecoin (DOGE-USD)", "DOGE-USD", Crypto, Usd),
    ]
}
