//! Database seeder for Kopera development and testing.
//!
//! Seeds a small chart of accounts: general accounts for each category,
//! detail accounts under them, and the equity account that receives the
//! yearly net result.
//!
//! Usage: cargo run --bin seeder

use kopera_core::account::AccountCategory;
use kopera_db::repositories::{
    AccountRepository, CreateDetailAccountInput, CreateGeneralAccountInput,
};
use uuid::Uuid;

/// Seed actor ID (consistent for all seeds)
const SEED_ACTOR_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Number of the equity detail account receiving the yearly net result.
const NET_RESULT_ACCOUNT: &str = "3201";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = kopera_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let accounts = AccountRepository::new(db);
    let actor = seed_actor_id();

    println!("Seeding chart of accounts...");
    seed_chart_of_accounts(&accounts, actor).await;

    println!("Seeding complete!");
}

fn seed_actor_id() -> Uuid {
    Uuid::parse_str(SEED_ACTOR_ID).unwrap()
}

/// (number, name, category, details)
type ChartRow = (
    &'static str,
    &'static str,
    AccountCategory,
    &'static [(&'static str, &'static str)],
);

const CHART: &[ChartRow] = &[
    (
        "1100",
        "Cash and bank",
        AccountCategory::Asset,
        &[("1101", "Cash on hand"), ("1102", "Bank account")],
    ),
    (
        "1200",
        "Member receivables",
        AccountCategory::Asset,
        &[("1201", "Member loans outstanding")],
    ),
    (
        "2100",
        "Member savings",
        AccountCategory::Liability,
        &[("2101", "Mandatory savings"), ("2102", "Voluntary savings")],
    ),
    (
        "3100",
        "Member equity",
        AccountCategory::Equity,
        &[("3101", "Principal deposits")],
    ),
    (
        "3200",
        "Retained results",
        AccountCategory::Equity,
        &[(NET_RESULT_ACCOUNT, "Net result of the year")],
    ),
    (
        "4100",
        "Operating revenue",
        AccountCategory::Revenue,
        &[("4101", "Loan interest income"), ("4102", "Service fees")],
    ),
    (
        "5100",
        "Operating expense",
        AccountCategory::Expense,
        &[("5101", "Administration expense"), ("5102", "Staff expense")],
    ),
];

async fn seed_chart_of_accounts(accounts: &AccountRepository, actor: Uuid) {
    for (number, name, category, details) in CHART {
        if accounts
            .find_active_general_by_number(number)
            .await
            .expect("Failed to query general account")
            .is_some()
        {
            println!("  {number} {name} (exists, skipped)");
            continue;
        }

        let general = accounts
            .create_general(CreateGeneralAccountInput {
                account_number: (*number).to_string(),
                name: (*name).to_string(),
                category: *category,
                actor,
            })
            .await
            .expect("Failed to create general account");
        println!("  {number} {name}");

        for (detail_number, detail_name) in *details {
            accounts
                .create_detail(CreateDetailAccountInput {
                    general_id: general.id,
                    account_number: (*detail_number).to_string(),
                    name: (*detail_name).to_string(),
                    actor,
                })
                .await
                .expect("Failed to create detail account");
            println!("    {detail_number} {detail_name}");
        }
    }
}
