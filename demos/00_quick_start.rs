/// quick start - prepay a lump sum or put it on deposit?
use loan_prepay_sim::{Simulator, SimulatorInput};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=loan_prepay_sim=debug shows the intermediate figures
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 10,000,000 left at 4.5% over 36 months, 10,000,000 spare cash
    let input = SimulatorInput::default();
    let comparison = Simulator::default().compare(&input)?;

    println!("prepayment fee:   {}", comparison.prepayment.prepayment_fee);
    println!("interest saved:   {}", comparison.prepayment.interest_saved);
    println!("net benefit:      {}", comparison.prepayment.net_benefit);
    println!("deposit interest: {}", comparison.savings.net_interest);
    println!("difference:       {}", comparison.difference);
    println!("recommendation:   {:?}", comparison.recommendation);

    Ok(())
}
