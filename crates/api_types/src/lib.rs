use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod route {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RouteView {
        /// Route id (UUID).
        ///
        /// This is serialized as a string in JSON.
        pub id: Uuid,
        pub route_code: String,
        pub ship_id: String,
        pub vessel_type: String,
        pub fuel_type: String,
        pub year: i32,
        pub ghg_intensity: f64,
        pub fuel_consumption_t: f64,
        pub distance_km: f64,
        pub total_emissions_t: f64,
        pub is_baseline: bool,
    }

    /// Query string for the comparison view.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ComparisonQuery {
        pub year: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ComparedRouteView {
        #[serde(flatten)]
        pub route: RouteView,
        /// Intensity delta vs the baseline, in percent.
        pub percent_diff: f64,
        pub compliant: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ComparisonResponse {
        pub baseline: RouteView,
        pub comparisons: Vec<ComparedRouteView>,
        pub target: f64,
    }
}

pub mod compliance {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CbQuery {
        pub ship_id: String,
        pub year: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CbResponse {
        pub ship_id: String,
        pub year: i32,
        pub compliance_balance: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AdjustedCbResponse {
        pub ship_id: String,
        pub year: i32,
        pub adjusted_compliance_balance: f64,
    }
}

pub mod banking {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RecordsQuery {
        pub ship_id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BankEntryView {
        pub id: Uuid,
        pub ship_id: String,
        /// Year the surplus was earned.
        pub year: i32,
        /// Amount still available for deduction, in gCO2e.
        pub amount_gco2eq: f64,
    }

    /// Request body for banking a year's surplus.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BankSurplus {
        pub ship_id: String,
        pub year: i32,
    }

    /// Request body for applying banked surplus to a deficit year.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ApplyBankedSurplus {
        pub ship_id: String,
        pub deficit_year: i32,
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Message {
        pub message: String,
    }
}

pub mod pool {
    use super::*;

    /// Request body for creating a pool.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PoolNew {
        pub year: i32,
        pub members: Vec<PoolMemberNew>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PoolMemberNew {
        pub ship_id: String,
        /// Compliance Balance the ship brings into the pool.
        pub cb_before: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PoolMemberView {
        pub ship_id: String,
        pub cb_before: f64,
        pub cb_after: f64,
    }
}
