use crate::constants::SCALE_HUNDRED_MILLION;
use serde::Serialize;

/// Day-over-day volume change for the queried range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeChange {
    /// Range volume sum minus the prior day's volume
    pub change: i64,
    /// Change as a percentage of the prior day's volume
    pub pct: f64,
}

/// Computed key indicators for a brand over a date range
///
/// Every entry is independently optional: insufficient data for one
/// indicator leaves it `None` without affecting the others. Rendering of
/// `None` as "N/A" happens only at the response boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyIndicators {
    /// Annualized volatility as a fraction (0.23 = 23%)
    pub volatility: Option<f64>,

    /// Estimated market value (assumed share count x latest close)
    pub market_value: Option<f64>,

    /// Total volume over the range
    pub trading_volume: Option<i64>,

    /// Volume change versus the day before the range end
    pub volume_change: Option<VolumeChange>,

    /// Annualized historical return as a fraction
    pub historical_return: Option<f64>,
}

impl KeyIndicators {
    /// Render into the response shape with formatted string values
    pub fn into_response(self) -> KeyIndicatorsResponse {
        KeyIndicatorsResponse {
            volatility: self
                .volatility
                .map(format_pct)
                .unwrap_or_else(not_available),
            market_value: self
                .market_value
                .map(|v| format!("{:.2} trillion", v / SCALE_HUNDRED_MILLION))
                .unwrap_or_else(not_available),
            trading_volume: self
                .trading_volume
                .map(|v| format!("{:.2} hundred million", v as f64 / SCALE_HUNDRED_MILLION))
                .unwrap_or_else(not_available),
            volume_change: self.volume_change.map(|vc| VolumeChangeResponse {
                change: vc.change,
                pct: format!("{:.2}%", vc.pct),
            }),
            historical_return: self
                .historical_return
                .map(format_pct)
                .unwrap_or_else(not_available),
        }
    }
}

/// Key indicators as serialized in the API response
#[derive(Debug, Clone, Serialize)]
pub struct KeyIndicatorsResponse {
    #[serde(rename = "Volatility")]
    pub volatility: String,

    #[serde(rename = "Market Value")]
    pub market_value: String,

    #[serde(rename = "Trading Volume")]
    pub trading_volume: String,

    #[serde(rename = "Volume Change", skip_serializing_if = "Option::is_none")]
    pub volume_change: Option<VolumeChangeResponse>,

    #[serde(rename = "Historical Return (Annualized)")]
    pub historical_return: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VolumeChangeResponse {
    pub change: i64,
    pub pct: String,
}

fn format_pct(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

fn not_available() -> String {
    "N/A".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_indicators_render_not_available() {
        let resp = KeyIndicators::default().into_response();
        assert_eq!(resp.volatility, "N/A");
        assert_eq!(resp.market_value, "N/A");
        assert_eq!(resp.trading_volume, "N/A");
        assert_eq!(resp.historical_return, "N/A");
        assert!(resp.volume_change.is_none());
    }

    #[test]
    fn test_percentage_formatting() {
        let indicators = KeyIndicators {
            volatility: Some(0.23656),
            historical_return: Some(0.365),
            ..Default::default()
        };
        let resp = indicators.into_response();
        assert_eq!(resp.volatility, "23.66%");
        assert_eq!(resp.historical_return, "36.50%");
    }

    #[test]
    fn test_scale_labels() {
        let indicators = KeyIndicators {
            market_value: Some(102.0 * 100_000_000.0),
            trading_volume: Some(1_200_000),
            ..Default::default()
        };
        let resp = indicators.into_response();
        assert_eq!(resp.market_value, "102.00 trillion");
        assert_eq!(resp.trading_volume, "0.01 hundred million");
    }

    #[test]
    fn test_volume_change_entry() {
        let indicators = KeyIndicators {
            trading_volume: Some(1_200_000),
            volume_change: Some(VolumeChange {
                change: 200_000,
                pct: 20.0,
            }),
            ..Default::default()
        };
        let resp = indicators.into_response();
        let vc = resp.volume_change.expect("volume change present");
        assert_eq!(vc.change, 200_000);
        assert_eq!(vc.pct, "20.00%");
    }

    #[test]
    fn test_volume_change_skipped_in_json_when_absent() {
        let json = serde_json::to_value(KeyIndicators::default().into_response()).unwrap();
        assert!(json.get("Volume Change").is_none());
        assert_eq!(json["Volatility"], "N/A");
    }
}
