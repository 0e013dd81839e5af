//! Static field metadata for form rendering
//!
//! Human-readable labels and descriptions for every input field, keyed by
//! wire name. Consumed only by the form-rendering collaborator; runtime
//! validation lives in [`crate::metrics`] and does not read this table.

/// Metadata for a single input field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Wire name (camelCase, as submitted by the form)
    pub name: &'static str,

    /// Short display label
    pub label: &'static str,

    /// Description shown as help text, including units and expected format
    pub description: &'static str,

    /// Whether the field must be supplied
    pub required: bool,
}

/// Metadata rows for every input field, in prompt order
pub const FIELD_METADATA: &[FieldMeta] = &[
    FieldMeta {
        name: "softwareName",
        label: "Software Name",
        description: "The name of the SaaS software or company.",
        required: false,
    },
    FieldMeta {
        name: "arr",
        label: "Annual Recurring Revenue (ARR)",
        description: "Current Annual Recurring Revenue (ARR) in USD.",
        required: true,
    },
    FieldMeta {
        name: "newBusinessARRGrowthRate",
        label: "New Business ARR Growth Rate",
        description: "Current annual growth rate from new business (e.g., 0.25 for 25%). Between 0 and 5.",
        required: true,
    },
    FieldMeta {
        name: "expansionARRGrowthRate",
        label: "Expansion ARR Growth Rate",
        description: "Current annual growth rate from existing customer expansion/upsell (e.g., 0.1 for 10%). Can be negative for contraction. Between -1 and 5.",
        required: true,
    },
    FieldMeta {
        name: "churnRate",
        label: "Annual Churn Rate",
        description: "Current annual churn rate as a decimal (e.g., 0.05 for 5%). Between 0 and 1.",
        required: true,
    },
    FieldMeta {
        name: "netRevenueRetention",
        label: "Net Revenue Retention (NRR/DBNER)",
        description: "Current Net Revenue Retention or Dollar-Based Net Expansion Rate as a decimal (e.g., 1.1 for 110%). Between 0 and 3.",
        required: true,
    },
    FieldMeta {
        name: "grossMargin",
        label: "Gross Margin",
        description: "Current gross margin as a decimal (e.g., 0.8 for 80%). Between 0 and 1.",
        required: true,
    },
    FieldMeta {
        name: "historicalFinancials",
        label: "Historical Financials",
        description: "Optional: historical financial data for up to the last 5 years.",
        required: false,
    },
    FieldMeta {
        name: "costOfGoodsSold",
        label: "Cost of Goods Sold (COGS)",
        description: "Optional: annual Cost of Goods Sold in USD. Includes hosting, third-party software, and customer support directly related to service delivery.",
        required: false,
    },
    FieldMeta {
        name: "salesMarketingSpendPercentage",
        label: "Sales & Marketing Spend (% of ARR)",
        description: "Current Sales & Marketing spend as a percentage of ARR (e.g., 0.4 for 40%).",
        required: true,
    },
    FieldMeta {
        name: "researchDevelopmentSpendPercentage",
        label: "Research & Development Spend (% of ARR)",
        description: "Current Research & Development spend as a percentage of ARR (e.g., 0.2 for 20%).",
        required: true,
    },
    FieldMeta {
        name: "generalAdministrativeSpendPercentage",
        label: "General & Administrative Spend (% of ARR)",
        description: "Optional: current General & Administrative spend as a percentage of ARR (e.g., 0.15 for 15%).",
        required: false,
    },
    FieldMeta {
        name: "ebitda",
        label: "EBITDA",
        description: "Optional: current annual Earnings Before Interest, Taxes, Depreciation, and Amortization in USD. Can be negative.",
        required: false,
    },
    FieldMeta {
        name: "totalCustomers",
        label: "Total Customers",
        description: "Optional: total number of active customers.",
        required: false,
    },
    FieldMeta {
        name: "customerAcquisitionCost",
        label: "Customer Acquisition Cost (CAC)",
        description: "Average Customer Acquisition Cost in USD.",
        required: true,
    },
    FieldMeta {
        name: "ltvToCacRatio",
        label: "LTV to CAC Ratio",
        description: "Customer Lifetime Value to CAC ratio (e.g., 3 for 3:1).",
        required: true,
    },
    FieldMeta {
        name: "cacByChannel",
        label: "CAC by Channel",
        description: "Optional: approximate CAC for key acquisition channels (e.g., \"Google Ads: $500, SEO: $200\").",
        required: false,
    },
    FieldMeta {
        name: "cohortAnalysisSummary",
        label: "Cohort Analysis Summary",
        description: "Optional: brief summary of cohort retention trends and LTV insights (e.g., \"12-month net retention for 2022 cohort was 115%\").",
        required: false,
    },
    FieldMeta {
        name: "pricingTiers",
        label: "Pricing Tiers",
        description: "Optional: description of pricing tiers (e.g., \"Basic: $29/mo, Pro: $99/mo, Enterprise: Custom\").",
        required: false,
    },
    FieldMeta {
        name: "averageDealSize",
        label: "Average Deal Size (ACV)",
        description: "Optional: average Annual Contract Value or deal size in USD.",
        required: false,
    },
    FieldMeta {
        name: "averageContractLengthMonths",
        label: "Average Contract Length",
        description: "Optional: average contract length in months.",
        required: false,
    },
    FieldMeta {
        name: "salesCycleLengthDays",
        label: "Average Sales Cycle",
        description: "Optional: average sales cycle length in days.",
        required: false,
    },
    FieldMeta {
        name: "customerAcquisitionChannels",
        label: "Customer Acquisition Channels",
        description: "Optional: main customer acquisition channels and their approximate contribution.",
        required: false,
    },
    FieldMeta {
        name: "marketingSpendBreakdown",
        label: "Marketing Spend Breakdown",
        description: "Optional: breakdown of marketing spend across key channels or categories.",
        required: false,
    },
    FieldMeta {
        name: "totalEmployees",
        label: "Total Employees",
        description: "Optional: total number of full-time employees.",
        required: false,
    },
    FieldMeta {
        name: "salesTeamSize",
        label: "Sales Team Size",
        description: "Optional: number of employees in sales roles.",
        required: false,
    },
    FieldMeta {
        name: "marketingTeamSize",
        label: "Marketing Team Size",
        description: "Optional: number of employees in marketing roles.",
        required: false,
    },
    FieldMeta {
        name: "engineeringTeamSize",
        label: "Engineering Team Size",
        description: "Optional: number of employees in engineering/R&D roles.",
        required: false,
    },
    FieldMeta {
        name: "cashBurnRateMonthly",
        label: "Monthly Cash Burn Rate",
        description: "Optional: average monthly net cash burn in USD. Positive if cash flow positive.",
        required: false,
    },
    FieldMeta {
        name: "cashRunwayMonths",
        label: "Cash Runway",
        description: "Optional: estimated months of cash runway remaining at the current burn rate.",
        required: false,
    },
    FieldMeta {
        name: "totalDebt",
        label: "Total Debt",
        description: "Optional: total outstanding debt in USD.",
        required: false,
    },
    FieldMeta {
        name: "equityStructureSummary",
        label: "Equity Structure Summary",
        description: "Optional: brief summary of equity structure (e.g., \"Series A preferred with 1x liquidation preference\").",
        required: false,
    },
    FieldMeta {
        name: "dailyActiveUsers",
        label: "Daily Active Users (DAU)",
        description: "Optional: Daily Active Users.",
        required: false,
    },
    FieldMeta {
        name: "monthlyActiveUsers",
        label: "Monthly Active Users (MAU)",
        description: "Optional: Monthly Active Users.",
        required: false,
    },
    FieldMeta {
        name: "keyFeatureAdoptionRate",
        label: "Key Feature Adoption Rate",
        description: "Optional: adoption rate of 1-2 key product features (e.g., \"Feature X: 60% of MAU\").",
        required: false,
    },
    FieldMeta {
        name: "fundingStage",
        label: "Funding Stage",
        description: "Current funding stage (e.g., Bootstrap, Seed, Series A, Growth Stage, Public).",
        required: false,
    },
    FieldMeta {
        name: "industryVertical",
        label: "Industry Vertical",
        description: "Primary industry vertical (e.g., FinTech, HealthTech, Enterprise SaaS, MarTech).",
        required: false,
    },
    FieldMeta {
        name: "targetMarket",
        label: "Target Market",
        description: "Primary target market segment (e.g., SMB, Mid-Market, Enterprise).",
        required: false,
    },
    FieldMeta {
        name: "customerGeographicConcentration",
        label: "Customer Geographic Concentration",
        description: "Optional: primary geographic markets and their approximate revenue contribution (e.g., \"North America: 70%, Europe: 20%, APAC: 10%\").",
        required: false,
    },
];

/// Look up metadata for a field by wire name
pub fn field_meta(name: &str) -> Option<&'static FieldMeta> {
    FIELD_METADATA.iter().find(|meta| meta.name == name)
}
