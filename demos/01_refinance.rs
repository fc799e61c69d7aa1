/// refinance - compare the current loan with a cheaper replacement
use loan_prepay_sim::{Decimal, RefinanceInput, RepaymentMethod, Simulator};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let simulator = Simulator::default();

    for (new_rate, new_months, new_method) in [
        (dec!(3.5), 36, RepaymentMethod::EqualPrincipalAndInterest),
        (dec!(3.0), 24, RepaymentMethod::EqualPrincipalAndInterest),
        (dec!(4.2), 60, RepaymentMethod::EqualPrincipal),
    ] {
        let input = RefinanceInput {
            new_rate,
            new_months,
            new_method,
            guarantee_fee: Decimal::from(50_000),
            ..RefinanceInput::default()
        };
        let outcome = simulator.refinance(&input)?;
        let result = &outcome.result;

        println!("{new_rate}% over {new_months} months ({new_method})");
        println!("  total cost:       {}", result.total_cost);
        println!("  interest saved:   {}", result.interest_saved);
        println!("  payment change:   {}", result.monthly_payment_diff);
        println!("  break-even month: {}", result.break_even_month);
        println!("  recommendation:   {:?}", outcome.recommendation);
    }

    Ok(())
}
