/// saved inputs - remember the last form values between sessions
use loan_prepay_sim::store::PREPAYMENT_INPUT_KEY;
use loan_prepay_sim::{
    monthly_accumulation, ActiveTab, Decimal, InputStore, KeyValueStore, MemoryStore, Rate, Money,
    SimulatorInput,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut store = InputStore::new(MemoryStore::new());

    let input = SimulatorInput {
        loan_balance: Decimal::from(30_000_000),
        extra_funds: Decimal::from(5_000_000),
        remaining_months: 12,
        ..SimulatorInput::default()
    };
    store.save_prepayment_input(&input)?;
    store.save_active_tab(ActiveTab::Prepayment)?;

    let restored = store.load_prepayment_input()?;
    println!("restored: {}", serde_json::to_string_pretty(&restored)?);

    // month-by-month deposit growth for the restored lump sum
    let series = monthly_accumulation(
        Money::from_decimal(restored.extra_funds),
        Rate::from_percent(restored.savings_rate),
        restored.remaining_months,
        restored.tax_type,
        restored.interest_type,
    )?;
    for point in &series {
        println!("month {:>3}: {}", point.month, point.cumulative_net_interest);
    }

    // a damaged record is replaced by the defaults (logged at warn)
    let mut backend = store.into_inner();
    backend.set(PREPAYMENT_INPUT_KEY, "{\"loanBalance\":".to_string())?;
    let store = InputStore::new(backend);
    println!("after corruption: {:?}", store.load_prepayment_input()?);

    Ok(())
}
