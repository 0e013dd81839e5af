//! Prompt assembly for the valuation and benchmark flows
//!
//! Each assembler validates its input first (fail fast: a malformed value is
//! never stringified into a prompt) and then renders a fixed sequence of
//! sections: identity, core financials, historical, P&L, unit economics,
//! pricing, sales & marketing, team, capital, debt/equity, product usage,
//! context, analysis instructions. Optional fields contribute a labeled line
//! only when present, so presence in the prompt mirrors presence in the
//! input, and identical inputs produce byte-identical prompts.

use saasval_schema::{MetricsInput, ValidationError, ValuationResult};

use crate::builder::PromptBuilder;

const VALUATION_PREAMBLE: &str = "You are an expert SaaS company valuation analyst providing a professional, in-depth valuation. Given the following detailed metrics, estimate a valuation range (low, high, and average) for the company in USD. Provide a comprehensive qualitative analysis supporting your valuation and calculate the implied ARR multiple.";

const VALUATION_INSTRUCTIONS: &str = r"Analysis Instructions:
Your analysis should be detailed and professional, covering:
1. Overall Valuation Rationale: Explain the primary drivers for the estimated valuation range. Refer to the company by its name if provided.
2. Impact of Key Metrics:
   - ARR Size & Growth: Contextualize ARR. Analyze current growth (New Business vs. Expansion) and NRR. If historical data is provided, discuss growth trends, consistency, and trajectory. High, efficient, and sustainable growth (strong NRR, good expansion) is critical.
   - Profitability & Margins: Discuss gross margin. If COGS provided, link it. Analyze operating margins considering S&M, R&D, G&A spend percentages. If EBITDA provided, evaluate its level (positive, negative, breakeven) and implications for cash flow, sustainability, and scalability. Strong margins relative to growth stage are highly valued.
   - Unit Economics & Customer Health: Evaluate CAC, LTV/CAC ratio, and churn rate. If total customers provided, calculate ARR per customer. If CAC by channel or cohort analysis provided, comment on acquisition efficiency and customer value trends. Healthy unit economics (LTV/CAC > 3, low churn) are vital.
   - Pricing & Sales Efficiency: If pricing tiers, average deal size, contract length, or sales cycle provided, comment on their implications for revenue predictability, customer stickiness, and sales motion efficiency.
   - Team & Operational Scale: If employee data provided (total, sales, marketing, R&D), comment on operational leverage, efficiency (e.g., ARR per employee), and capacity for growth.
   - Capital Position & Efficiency: If cash burn, runway, debt, or equity structure details provided, discuss financial health, runway risk, impact of debt on valuation, and potential implications of equity structure (e.g., liquidation preferences).
   - Product Engagement: If DAU/MAU or feature adoption rates provided, comment on user engagement and product stickiness.
   - Contextual Factors: Briefly discuss how funding stage, industry vertical, target market, and geographic concentration might influence valuation expectations and applicable multiples.
3. Valuation Multiples: Calculate and include the implied ARR multiple (Average Valuation / ARR). Discuss typical ARR multiples for companies with similar profiles (considering all provided data points: growth, profitability, market, etc.) to justify this multiple. Explain how the detailed financial and operational picture might affect this multiple compared to a simple ARR-based view.
4. Strengths & Weaknesses: Explicitly list 2-3 key strengths and 2-3 key weaknesses derived from the input data that significantly influence the valuation.

Output Format:
Answer with a JSON object with the keys: lowValuation, highValuation, averageValuation, impliedARRMultiple, analysis. All currency values should be in USD. The impliedARRMultiple should be a number. The analysis should be a comprehensive, well-structured string.";

const BENCHMARK_PREAMBLE: &str = "You are a seasoned SaaS industry analyst. Your task is to provide a competitive benchmark analysis for a SaaS company based on the following metrics and its estimated valuation.";

const BENCHMARK_INSTRUCTIONS: &str = r#"Instructions:
1. Overall Benchmark Analysis: Provide a concise qualitative analysis comparing the company's key metrics (ARR size context, Growth Rate, Churn Rate, Gross Margin) and its estimated valuation against typical industry benchmarks for SaaS companies. For each metric, state whether it's generally considered strong, average, or an area for concern for a company of this ARR level. Explain how these factors collectively influence its valuation.
2. Strength Areas: Identify 2-3 key strength areas. These should be metrics or aspects where the company performs notably well compared to general industry expectations.
3. Improvement Areas: Identify 2-3 key areas where the company could improve relative to benchmarks. These should be actionable or highlight potential risks.

Focus on providing insights that would be valuable to founders or investors. Be realistic and acknowledge that benchmarks can vary. Base your analysis on general SaaS industry knowledge.

Answer with a JSON object with the keys: "benchmarkAnalysis", "strengthAreas", and "improvementAreas"."#;

/// Assemble the valuation estimation prompt
///
/// Fails fast with the full violation list when the input does not satisfy
/// the metrics schema.
pub fn valuation_prompt(input: &MetricsInput) -> Result<String, ValidationError> {
    input.validate()?;
    Ok(render_valuation(input))
}

/// Assemble the benchmark comparison prompt
///
/// Requires the valuation produced by a prior estimation call; the benchmark
/// analysis is anchored on its average. Fails validation when the input is
/// out of range or the carried average is not a usable number.
pub fn benchmark_prompt(
    input: &MetricsInput,
    valuation: &ValuationResult,
) -> Result<String, ValidationError> {
    input.validate()?;
    if !valuation.average_valuation.is_finite() {
        return Err(ValidationError::single(
            "estimatedAverageValuation",
            "must be a finite number",
        ));
    }
    Ok(render_benchmark(input, valuation))
}

fn render_valuation(input: &MetricsInput) -> String {
    PromptBuilder::new()
        .line(VALUATION_PREAMBLE)
        .blank_line()
        .line("Company Details & Metrics:")
        .opt_text_field("Software Name", input.software_name.as_deref())
        .blank_line()
        .line("Current Core Metrics:")
        .field_with_unit("Annual Recurring Revenue (ARR)", input.arr, "USD")
        .field(
            "New Business ARR Growth Rate (annual)",
            input.new_business_arr_growth_rate,
        )
        .field(
            "Expansion ARR Growth Rate (annual)",
            input.expansion_arr_growth_rate,
        )
        .field("Annual Churn Rate", input.churn_rate)
        .field("Net Revenue Retention (NRR/DBNER)", input.net_revenue_retention)
        .field("Gross Margin", input.gross_margin)
        .apply(|b| historical_section(b, input))
        .blank_line()
        .line("P&L and Operational Costs:")
        .opt_field_with_unit("Cost of Goods Sold (COGS)", input.cost_of_goods_sold, "USD")
        .field(
            "Sales & Marketing Spend (% of ARR)",
            input.sales_marketing_spend_percentage,
        )
        .field(
            "Research & Development Spend (% of ARR)",
            input.research_development_spend_percentage,
        )
        .opt_field(
            "General & Administrative Spend (% of ARR)",
            input.general_administrative_spend_percentage,
        )
        .opt_field_with_unit("EBITDA", input.ebitda, "USD")
        .blank_line()
        .line("Customer Segmentation & Unit Economics:")
        .opt_field("Total Customers", input.total_customers)
        .field_with_unit(
            "Customer Acquisition Cost (CAC)",
            input.customer_acquisition_cost,
            "USD",
        )
        .field("LTV to CAC Ratio", input.ltv_to_cac_ratio)
        .opt_text_field("CAC by Channel", input.cac_by_channel.as_deref())
        .opt_text_field(
            "Cohort Analysis Summary",
            input.cohort_analysis_summary.as_deref(),
        )
        .blank_line()
        .line("Pricing Strategy:")
        .opt_text_field("Pricing Tiers", input.pricing_tiers.as_deref())
        .opt_field_with_unit("Average Deal Size (ACV)", input.average_deal_size, "USD")
        .opt_field_with_unit(
            "Average Contract Length",
            input.average_contract_length_months,
            "months",
        )
        .blank_line()
        .line("Sales & Marketing Details:")
        .opt_field_with_unit("Average Sales Cycle", input.sales_cycle_length_days, "days")
        .opt_text_field(
            "Customer Acquisition Channels",
            input.customer_acquisition_channels.as_deref(),
        )
        .opt_text_field(
            "Marketing Spend Breakdown",
            input.marketing_spend_breakdown.as_deref(),
        )
        .blank_line()
        .line("Team & Operations:")
        .opt_field("Total Employees", input.total_employees)
        .opt_field("Sales Team Size", input.sales_team_size)
        .opt_field("Marketing Team Size", input.marketing_team_size)
        .opt_field("Engineering Team Size", input.engineering_team_size)
        .blank_line()
        .line("Capital Efficiency:")
        .opt_field_with_unit(
            "Monthly Cash Burn Rate",
            input.cash_burn_rate_monthly,
            "USD",
        )
        .opt_field_with_unit("Cash Runway", input.cash_runway_months, "months")
        .blank_line()
        .line("Debt & Equity Structure:")
        .opt_field_with_unit("Total Debt", input.total_debt, "USD")
        .opt_text_field(
            "Equity Structure Summary",
            input.equity_structure_summary.as_deref(),
        )
        .blank_line()
        .line("Product Usage Data:")
        .opt_field("Daily Active Users (DAU)", input.daily_active_users)
        .opt_field("Monthly Active Users (MAU)", input.monthly_active_users)
        .opt_text_field(
            "Key Feature Adoption Rate",
            input.key_feature_adoption_rate.as_deref(),
        )
        .blank_line()
        .line("Contextual Information:")
        .opt_text_field("Funding Stage", input.funding_stage.as_deref())
        .opt_text_field("Industry Vertical", input.industry_vertical.as_deref())
        .opt_text_field("Target Market", input.target_market.as_deref())
        .opt_text_field(
            "Customer Geographic Concentration",
            input.customer_geographic_concentration.as_deref(),
        )
        .blank_line()
        .text(VALUATION_INSTRUCTIONS)
        .build_trimmed()
}

fn historical_section(builder: PromptBuilder, input: &MetricsInput) -> PromptBuilder {
    let mut dated = input.dated_history().peekable();
    if dated.peek().is_none() {
        return builder;
    }
    let mut builder = builder
        .blank_line()
        .line("Historical Financial Performance (up to 5 years):");
    for entry in dated {
        let Some(year) = entry.year else { continue };
        builder = builder
            .field("Year", year)
            .opt_sub_field("ARR", entry.arr, "USD")
            .opt_sub_field("Total Revenue", entry.revenue, "USD")
            .opt_sub_field("Total Expenses", entry.expenses, "USD")
            .opt_sub_field("Net Profit/Loss", entry.net_profit_or_loss, "USD")
            .opt_sub_field("Customer Count", entry.customer_count, "");
    }
    builder
}

fn render_benchmark(input: &MetricsInput, valuation: &ValuationResult) -> String {
    PromptBuilder::new()
        .line(BENCHMARK_PREAMBLE)
        .blank_line()
        .line("Company Metrics:")
        .field_with_unit("Annual Recurring Revenue (ARR)", input.arr, "USD")
        .field_with_unit(
            "Year-over-Year Growth Rate",
            input.combined_growth_rate(),
            "(decimal format)",
        )
        .field_with_unit("Annual Churn Rate", input.churn_rate, "(decimal format)")
        .field_with_unit("Gross Margin", input.gross_margin, "(decimal format)")
        .field_with_unit(
            "Estimated Average Valuation",
            valuation.average_valuation,
            "USD",
        )
        .blank_line()
        .text(BENCHMARK_INSTRUCTIONS)
        .build_trimmed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use saasval_schema::HistoricalYear;

    fn core_input() -> MetricsInput {
        MetricsInput {
            arr: 1_000_000.0,
            new_business_arr_growth_rate: 0.2,
            expansion_arr_growth_rate: 0.1,
            churn_rate: 0.1,
            net_revenue_retention: 1.05,
            gross_margin: 0.75,
            sales_marketing_spend_percentage: 0.4,
            research_development_spend_percentage: 0.2,
            customer_acquisition_cost: 5000.0,
            ltv_to_cac_ratio: 3.5,
            ..MetricsInput::default()
        }
    }

    fn valuation() -> ValuationResult {
        ValuationResult {
            low_valuation: 3_000_000.0,
            high_valuation: 6_000_000.0,
            average_valuation: 4_500_000.0,
            implied_arr_multiple: Some(4.5),
            analysis: "...".to_string(),
        }
    }

    #[test]
    fn test_core_metrics_always_present() {
        let prompt = valuation_prompt(&core_input()).unwrap();
        assert!(prompt.contains("- Annual Recurring Revenue (ARR): 1000000 USD"));
        assert!(prompt.contains("- New Business ARR Growth Rate (annual): 0.2"));
        assert!(prompt.contains("- Expansion ARR Growth Rate (annual): 0.1"));
        assert!(prompt.contains("- Annual Churn Rate: 0.1"));
        assert!(prompt.contains("- Net Revenue Retention (NRR/DBNER): 1.05"));
        assert!(prompt.contains("- Gross Margin: 0.75"));
        assert!(prompt.contains("- Customer Acquisition Cost (CAC): 5000 USD"));
        assert!(prompt.contains("- LTV to CAC Ratio: 3.5"));
    }

    #[test]
    fn test_absent_optionals_leave_no_label() {
        let prompt = valuation_prompt(&core_input()).unwrap();
        assert!(!prompt.contains("Software Name"));
        assert!(!prompt.contains("Total Customers"));
        assert!(!prompt.contains("Historical Financial Performance"));
        assert!(!prompt.contains("EBITDA:"));
        assert!(!prompt.contains("Funding Stage"));
    }

    #[test]
    fn test_present_optionals_are_labeled() {
        let input = MetricsInput {
            software_name: Some("Acme Analytics".to_string()),
            total_customers: Some(250),
            ebitda: Some(-120_000.0),
            funding_stage: Some("Series A".to_string()),
            ..core_input()
        };
        let prompt = valuation_prompt(&input).unwrap();
        assert!(prompt.contains("- Software Name: Acme Analytics"));
        assert!(prompt.contains("- Total Customers: 250"));
        assert!(prompt.contains("- EBITDA: -120000 USD"));
        assert!(prompt.contains("- Funding Stage: Series A"));
    }

    #[test]
    fn test_empty_string_counts_as_absent() {
        let input = MetricsInput {
            pricing_tiers: Some(String::new()),
            ..core_input()
        };
        let prompt = valuation_prompt(&input).unwrap();
        assert!(!prompt.contains("Pricing Tiers"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let input = MetricsInput {
            software_name: Some("Acme".to_string()),
            total_customers: Some(99),
            historical_financials: Some(vec![HistoricalYear {
                year: Some(2023),
                arr: Some(800_000.0),
                ..HistoricalYear::default()
            }]),
            ..core_input()
        };
        assert_eq!(
            valuation_prompt(&input).unwrap(),
            valuation_prompt(&input).unwrap()
        );
    }

    #[test]
    fn test_section_order_is_fixed() {
        let prompt = valuation_prompt(&core_input()).unwrap();
        let positions: Vec<usize> = [
            "Current Core Metrics:",
            "P&L and Operational Costs:",
            "Customer Segmentation & Unit Economics:",
            "Pricing Strategy:",
            "Sales & Marketing Details:",
            "Team & Operations:",
            "Capital Efficiency:",
            "Debt & Equity Structure:",
            "Product Usage Data:",
            "Contextual Information:",
            "Analysis Instructions:",
        ]
        .iter()
        .map(|section| prompt.find(section).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_historical_entry_without_year_is_skipped() {
        let input = MetricsInput {
            historical_financials: Some(vec![
                HistoricalYear {
                    year: Some(2023),
                    arr: Some(800_000.0),
                    ..HistoricalYear::default()
                },
                HistoricalYear {
                    arr: Some(900_000.0),
                    ..HistoricalYear::default()
                },
            ]),
            ..core_input()
        };
        let prompt = valuation_prompt(&input).unwrap();
        assert_eq!(prompt.matches("- Year: ").count(), 1);
        assert!(prompt.contains("- Year: 2023"));
        assert!(prompt.contains("  - ARR: 800000 USD"));
        assert!(!prompt.contains("900000"));
    }

    #[test]
    fn test_historical_sub_fields_conditional() {
        let input = MetricsInput {
            historical_financials: Some(vec![HistoricalYear {
                year: Some(2022),
                revenue: Some(650_000.0),
                customer_count: Some(40),
                ..HistoricalYear::default()
            }]),
            ..core_input()
        };
        let prompt = valuation_prompt(&input).unwrap();
        assert!(prompt.contains("- Year: 2022"));
        assert!(prompt.contains("  - Total Revenue: 650000 USD"));
        assert!(prompt.contains("  - Customer Count: 40"));
        assert!(!prompt.contains("  - ARR:"));
        assert!(!prompt.contains("Net Profit/Loss"));
    }

    #[test]
    fn test_only_dated_entries_no_header_when_none() {
        let input = MetricsInput {
            historical_financials: Some(vec![HistoricalYear {
                arr: Some(1.0),
                ..HistoricalYear::default()
            }]),
            ..core_input()
        };
        let prompt = valuation_prompt(&input).unwrap();
        assert!(!prompt.contains("Historical Financial Performance"));
    }

    #[test]
    fn test_invalid_input_refused() {
        let input = MetricsInput {
            churn_rate: 2.0,
            ..core_input()
        };
        let err = valuation_prompt(&input).unwrap_err();
        assert_eq!(err.violations[0].field, "churnRate");
    }

    #[test]
    fn test_benchmark_prompt_contents() {
        let prompt = benchmark_prompt(&core_input(), &valuation()).unwrap();
        assert!(prompt.contains("- Annual Recurring Revenue (ARR): 1000000 USD"));
        // Combined growth: new business 0.2 + expansion 0.1
        assert!(prompt.contains("- Year-over-Year Growth Rate: 0.30000000000000004 (decimal format)"));
        assert!(prompt.contains("- Estimated Average Valuation: 4500000 USD"));
        assert!(prompt.contains("\"benchmarkAnalysis\""));
    }

    #[test]
    fn test_benchmark_requires_finite_average() {
        let bad = ValuationResult {
            average_valuation: f64::NAN,
            ..valuation()
        };
        let err = benchmark_prompt(&core_input(), &bad).unwrap_err();
        assert_eq!(err.violations[0].field, "estimatedAverageValuation");
    }

    #[test]
    fn test_benchmark_validates_input_too() {
        let input = MetricsInput {
            gross_margin: 2.0,
            ..core_input()
        };
        assert!(benchmark_prompt(&input, &valuation()).is_err());
    }
}
