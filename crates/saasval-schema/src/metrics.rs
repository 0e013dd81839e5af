//! Business metrics input schema
//!
//! [`MetricsInput`] is the full snapshot a user submits for valuation:
//! a small required core (ARR, growth components, churn, NRR, margins,
//! spend percentages, CAC, LTV:CAC) plus a long tail of optional P&L,
//! unit-economics, pricing, team, capital, product-usage, and context
//! detail. Wire names are camelCase to match the form payloads.
//!
//! Validation is a separate pass over the typed value: [`MetricsInput::validate`]
//! enforces every documented range and collects all violations instead of
//! stopping at the first. Absent optionals are never defaulted; `None` means
//! "not provided" throughout the pipeline.

use serde::{Deserialize, Serialize};

use crate::coerce;
use crate::error::{ValidationError, Violation};

/// Maximum number of historical financial entries accepted
pub const MAX_HISTORICAL_YEARS: usize = 5;

/// One year of historical financial data
///
/// Every sub-field is independently optional. Entries without a `year` are
/// discarded before use (they cannot be labeled in the prompt); they are not
/// a validation error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalYear {
    /// Financial year (e.g. 2023)
    #[serde(default, deserialize_with = "coerce::opt_year")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Annual Recurring Revenue for the year in USD
    #[serde(default, deserialize_with = "coerce::opt_num")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arr: Option<f64>,

    /// Total revenue for the year in USD
    #[serde(default, deserialize_with = "coerce::opt_num")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,

    /// Total operating expenses for the year in USD
    #[serde(default, deserialize_with = "coerce::opt_num")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expenses: Option<f64>,

    /// Net profit or loss for the year in USD
    #[serde(default, deserialize_with = "coerce::opt_num")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_profit_or_loss: Option<f64>,

    /// Active customers at year end
    #[serde(default, deserialize_with = "coerce::opt_count")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_count: Option<u64>,
}

/// Business snapshot provided by the user
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsInput {
    /// Name of the SaaS software or company
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_name: Option<String>,

    // Core current metrics (required)
    /// Current Annual Recurring Revenue in USD
    #[serde(deserialize_with = "coerce::num")]
    pub arr: f64,

    /// Annual growth rate from new business (0.25 for 25%)
    #[serde(rename = "newBusinessARRGrowthRate", deserialize_with = "coerce::num")]
    pub new_business_arr_growth_rate: f64,

    /// Annual growth rate from existing customer expansion; negative means contraction
    #[serde(rename = "expansionARRGrowthRate", deserialize_with = "coerce::num")]
    pub expansion_arr_growth_rate: f64,

    /// Annual churn rate as a decimal (0.05 for 5%)
    #[serde(deserialize_with = "coerce::num")]
    pub churn_rate: f64,

    /// Net Revenue Retention / DBNER as a decimal (1.1 for 110%)
    #[serde(deserialize_with = "coerce::num")]
    pub net_revenue_retention: f64,

    /// Gross margin as a decimal (0.8 for 80%)
    #[serde(deserialize_with = "coerce::num")]
    pub gross_margin: f64,

    /// Sales & Marketing spend as a fraction of ARR
    #[serde(deserialize_with = "coerce::num")]
    pub sales_marketing_spend_percentage: f64,

    /// Research & Development spend as a fraction of ARR
    #[serde(deserialize_with = "coerce::num")]
    pub research_development_spend_percentage: f64,

    /// Average Customer Acquisition Cost in USD
    #[serde(deserialize_with = "coerce::num")]
    pub customer_acquisition_cost: f64,

    /// LTV to CAC ratio (3 for 3:1)
    #[serde(deserialize_with = "coerce::num")]
    pub ltv_to_cac_ratio: f64,

    // Historical financial data
    /// Up to five previous years of financials, newest conventions apply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_financials: Option<Vec<HistoricalYear>>,

    // Detailed P&L / operational costs
    /// Annual Cost of Goods Sold in USD
    #[serde(default, deserialize_with = "coerce::opt_num")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_of_goods_sold: Option<f64>,

    /// General & Administrative spend as a fraction of ARR
    #[serde(default, deserialize_with = "coerce::opt_num")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_administrative_spend_percentage: Option<f64>,

    /// Annual EBITDA in USD; can be negative
    #[serde(default, deserialize_with = "coerce::opt_num")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda: Option<f64>,

    // Customer segmentation & unit economics
    /// Total number of active customers
    #[serde(default, deserialize_with = "coerce::opt_count")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_customers: Option<u64>,

    /// Approximate CAC for key acquisition channels, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cac_by_channel: Option<String>,

    /// Summary of cohort retention trends and LTV insights, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cohort_analysis_summary: Option<String>,

    // Pricing strategy
    /// Description of pricing tiers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_tiers: Option<String>,

    /// Average Annual Contract Value or deal size in USD
    #[serde(default, deserialize_with = "coerce::opt_num")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_deal_size: Option<f64>,

    /// Average contract length in months
    #[serde(default, deserialize_with = "coerce::opt_count")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_contract_length_months: Option<u64>,

    // Sales & marketing detail
    /// Average sales cycle length in days
    #[serde(default, deserialize_with = "coerce::opt_count")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_cycle_length_days: Option<u64>,

    /// Main customer acquisition channels, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_acquisition_channels: Option<String>,

    /// Breakdown of marketing spend across channels, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_spend_breakdown: Option<String>,

    // Team & operations
    /// Total full-time employees
    #[serde(default, deserialize_with = "coerce::opt_count")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_employees: Option<u64>,

    /// Employees in sales roles
    #[serde(default, deserialize_with = "coerce::opt_count")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_team_size: Option<u64>,

    /// Employees in marketing roles
    #[serde(default, deserialize_with = "coerce::opt_count")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_team_size: Option<u64>,

    /// Employees in engineering/R&D roles
    #[serde(default, deserialize_with = "coerce::opt_count")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engineering_team_size: Option<u64>,

    // Capital efficiency
    /// Average monthly net cash burn in USD; positive if cash flow positive
    #[serde(default, deserialize_with = "coerce::opt_num")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_burn_rate_monthly: Option<f64>,

    /// Months of cash runway remaining
    #[serde(default, deserialize_with = "coerce::opt_num")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_runway_months: Option<f64>,

    // Debt & equity structure
    /// Total outstanding debt in USD
    #[serde(default, deserialize_with = "coerce::opt_num")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_debt: Option<f64>,

    /// Summary of equity structure, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equity_structure_summary: Option<String>,

    // Product usage
    /// Daily Active Users
    #[serde(default, deserialize_with = "coerce::opt_count")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_active_users: Option<u64>,

    /// Monthly Active Users
    #[serde(default, deserialize_with = "coerce::opt_count")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_active_users: Option<u64>,

    /// Adoption rate of key product features, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_feature_adoption_rate: Option<String>,

    // Contextual information
    /// Funding stage (Bootstrap, Seed, Series A, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_stage: Option<String>,

    /// Primary industry vertical
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_vertical: Option<String>,

    /// Primary target market segment (SMB, Mid-Market, Enterprise)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_market: Option<String>,

    /// Primary geographic markets and revenue contribution, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_geographic_concentration: Option<String>,
}

impl MetricsInput {
    /// Deserialize from a raw JSON payload, coercing numeric strings
    ///
    /// Structural or coercion failures become a [`ValidationError`] rather
    /// than a crash. Range constraints are not checked here; call
    /// [`validate`](Self::validate) on the result.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value)
            .map_err(|e| ValidationError::single("input", e.to_string()))
    }

    /// Validate every documented range constraint
    ///
    /// Collects all violations; `Ok(())` means the input is safe to hand to
    /// the prompt assembler.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Vec::new();

        require_min(&mut v, "arr", self.arr, 0.0);
        require_range(&mut v, "newBusinessARRGrowthRate", self.new_business_arr_growth_rate, 0.0, 5.0);
        require_range(&mut v, "expansionARRGrowthRate", self.expansion_arr_growth_rate, -1.0, 5.0);
        require_range(&mut v, "churnRate", self.churn_rate, 0.0, 1.0);
        require_range(&mut v, "netRevenueRetention", self.net_revenue_retention, 0.0, 3.0);
        require_range(&mut v, "grossMargin", self.gross_margin, 0.0, 1.0);
        require_range(&mut v, "salesMarketingSpendPercentage", self.sales_marketing_spend_percentage, 0.0, 1.0);
        require_range(&mut v, "researchDevelopmentSpendPercentage", self.research_development_spend_percentage, 0.0, 1.0);
        require_positive(&mut v, "customerAcquisitionCost", self.customer_acquisition_cost);
        require_positive(&mut v, "ltvToCacRatio", self.ltv_to_cac_ratio);

        opt_min(&mut v, "costOfGoodsSold", self.cost_of_goods_sold, 0.0);
        opt_range(&mut v, "generalAdministrativeSpendPercentage", self.general_administrative_spend_percentage, 0.0, 1.0);
        opt_finite(&mut v, "ebitda", self.ebitda);
        opt_positive_count(&mut v, "totalCustomers", self.total_customers);
        opt_max_len(&mut v, "cacByChannel", self.cac_by_channel.as_deref(), 500);
        opt_max_len(&mut v, "cohortAnalysisSummary", self.cohort_analysis_summary.as_deref(), 1000);
        opt_max_len(&mut v, "pricingTiers", self.pricing_tiers.as_deref(), 500);
        opt_positive(&mut v, "averageDealSize", self.average_deal_size);
        opt_positive_count(&mut v, "averageContractLengthMonths", self.average_contract_length_months);
        opt_positive_count(&mut v, "salesCycleLengthDays", self.sales_cycle_length_days);
        opt_max_len(&mut v, "customerAcquisitionChannels", self.customer_acquisition_channels.as_deref(), 500);
        opt_max_len(&mut v, "marketingSpendBreakdown", self.marketing_spend_breakdown.as_deref(), 500);
        opt_positive_count(&mut v, "totalEmployees", self.total_employees);
        opt_positive_count(&mut v, "salesTeamSize", self.sales_team_size);
        opt_positive_count(&mut v, "marketingTeamSize", self.marketing_team_size);
        opt_positive_count(&mut v, "engineeringTeamSize", self.engineering_team_size);
        opt_finite(&mut v, "cashBurnRateMonthly", self.cash_burn_rate_monthly);
        opt_positive(&mut v, "cashRunwayMonths", self.cash_runway_months);
        opt_min(&mut v, "totalDebt", self.total_debt, 0.0);
        opt_max_len(&mut v, "equityStructureSummary", self.equity_structure_summary.as_deref(), 1000);
        opt_positive_count(&mut v, "dailyActiveUsers", self.daily_active_users);
        opt_positive_count(&mut v, "monthlyActiveUsers", self.monthly_active_users);
        opt_max_len(&mut v, "keyFeatureAdoptionRate", self.key_feature_adoption_rate.as_deref(), 500);
        opt_max_len(&mut v, "fundingStage", self.funding_stage.as_deref(), 100);
        opt_max_len(&mut v, "industryVertical", self.industry_vertical.as_deref(), 100);
        opt_max_len(&mut v, "targetMarket", self.target_market.as_deref(), 100);
        opt_max_len(&mut v, "customerGeographicConcentration", self.customer_geographic_concentration.as_deref(), 500);

        if let Some(history) = &self.historical_financials {
            if history.len() > MAX_HISTORICAL_YEARS {
                v.push(Violation::new(
                    "historicalFinancials",
                    format!("please provide data for up to the last {MAX_HISTORICAL_YEARS} years"),
                ));
            }
            for (i, entry) in history.iter().enumerate() {
                let at = |name: &str| format!("historicalFinancials[{i}].{name}");
                opt_finite(&mut v, &at("arr"), entry.arr);
                opt_finite(&mut v, &at("revenue"), entry.revenue);
                opt_finite(&mut v, &at("expenses"), entry.expenses);
                opt_finite(&mut v, &at("netProfitOrLoss"), entry.net_profit_or_loss);
                opt_positive_count(&mut v, &at("customerCount"), entry.customer_count);
            }
        }

        if v.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(v))
        }
    }

    /// Historical entries usable in a prompt: those that carry a year
    ///
    /// Entries without a year are discarded here, never rejected.
    pub fn dated_history(&self) -> impl Iterator<Item = &HistoricalYear> {
        self.historical_financials
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|entry| entry.year.is_some())
    }

    /// Combined annual growth rate: new business plus expansion
    pub fn combined_growth_rate(&self) -> f64 {
        self.new_business_arr_growth_rate + self.expansion_arr_growth_rate
    }
}

fn require_range(v: &mut Vec<Violation>, field: &str, value: f64, min: f64, max: f64) {
    if !value.is_finite() || value < min || value > max {
        v.push(Violation::new(
            field,
            format!("must be between {min} and {max}"),
        ));
    }
}

fn require_min(v: &mut Vec<Violation>, field: &str, value: f64, min: f64) {
    if !value.is_finite() || value < min {
        v.push(Violation::new(field, format!("must be at least {min}")));
    }
}

fn require_positive(v: &mut Vec<Violation>, field: &str, value: f64) {
    if !value.is_finite() || value <= 0.0 {
        v.push(Violation::new(field, "must be a positive number"));
    }
}

fn opt_range(v: &mut Vec<Violation>, field: &str, value: Option<f64>, min: f64, max: f64) {
    if let Some(value) = value {
        require_range(v, field, value, min, max);
    }
}

fn opt_min(v: &mut Vec<Violation>, field: &str, value: Option<f64>, min: f64) {
    if let Some(value) = value {
        require_min(v, field, value, min);
    }
}

fn opt_positive(v: &mut Vec<Violation>, field: &str, value: Option<f64>) {
    if let Some(value) = value {
        require_positive(v, field, value);
    }
}

fn opt_finite(v: &mut Vec<Violation>, field: &str, value: Option<f64>) {
    if let Some(value) = value {
        if !value.is_finite() {
            v.push(Violation::new(field, "must be a finite number"));
        }
    }
}

fn opt_positive_count(v: &mut Vec<Violation>, field: &str, value: Option<u64>) {
    if value == Some(0) {
        v.push(Violation::new(field, "must be a positive count"));
    }
}

fn opt_max_len(v: &mut Vec<Violation>, field: &str, value: Option<&str>, max: usize) {
    if let Some(text) = value {
        if text.chars().count() > max {
            v.push(Violation::new(
                field,
                format!("must be at most {max} characters"),
            ));
        }
    }
}
