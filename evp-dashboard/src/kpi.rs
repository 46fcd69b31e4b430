//! KPI grid values.

use evp_data::summary::Summary;
use evp_utils::numbers::{format_count, format_optional};
use evp_utils::PLACEHOLDER;
use serde::Serialize;

/// One card of the KPI grid: a caption and its display value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KpiCard {
    /// Stable identifier for the presentation layer
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// The five KPI cards, in grid order.
pub fn kpi_cards(summary: &Summary) -> Vec<KpiCard> {
    let top_make = summary
        .top_makes
        .first()
        .map(|m| m.make.clone())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    vec![
        KpiCard {
            key: "total",
            label: "Total vehicles",
            value: format_count(summary.total),
        },
        KpiCard {
            key: "bevCount",
            label: "Battery electric (BEV)",
            value: format_count(summary.bev_count),
        },
        KpiCard {
            key: "phevCount",
            label: "Plug-in hybrid (PHEV)",
            value: format_count(summary.phev_count),
        },
        KpiCard {
            key: "avgElectricRange",
            label: "Avg electric range (mi)",
            value: format_optional(summary.avg_electric_range),
        },
        KpiCard {
            key: "topMake",
            label: "Top make",
            value: top_make,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use evp_data::summary::{summarize, SummaryOptions};

    #[test]
    fn test_empty_summary_cards() {
        let cards = kpi_cards(&Summary::empty(&SummaryOptions::default()));
        let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["0", "0", "0", "—", "—"]);
    }

    #[test]
    fn test_sample_cards() {
        let loaded =
            evp_records::load::parse_csv(include_str!("../../fixtures/ev_population_sample.csv"))
                .unwrap();
        let cards = kpi_cards(&summarize(&loaded.records));
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].value, "13");
        assert_eq!(cards[1].value, "8");
        assert_eq!(cards[2].value, "5");
        assert_eq!(cards[3].value, "140");
        assert_eq!(cards[4].key, "topMake");
        assert_eq!(cards[4].value, "TESLA");
    }

    #[test]
    fn test_total_uses_thousands_separator() {
        let mut summary = Summary::empty(&SummaryOptions::default());
        summary.total = 181_458;
        assert_eq!(kpi_cards(&summary)[0].value, "181,458");
    }
}
