//! Database seeder for BudgetLens development and testing.
//!
//! Seeds a demo hospital category hierarchy with procurement items, four
//! fiscal years of planned amounts and three years of monthly actuals.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use uuid::Uuid;

use budgetlens_core::fiscal::{FiscalYear, month_index};
use budgetlens_core::hierarchy::{
    ActualEntry, BudgetCategory, CategoryType, PlanOwner, PlanRecord, ProcurementItem,
};
use budgetlens_core::store::BudgetStore;
use budgetlens_db::BudgetRepository;
use budgetlens_db::entities::budget_categories;
use budgetlens_shared::types::{ActualEntryId, CategoryId, ItemId, PlanId, UserId};

/// Seeding user ID (consistent for all seeds)
const SEED_USER_ID: u128 = 0x5EED;

/// First and last fiscal year with planned amounts.
const PLAN_YEARS: std::ops::RangeInclusive<i32> = 2567..=2570;

/// The current demo year; only part of it has actuals.
const CURRENT_YEAR: i32 = 2569;

/// Months of the current year that already have actuals (October to June).
const CURRENT_YEAR_MONTHS: usize = 9;

/// (id, code, name, level, parent, type, annual plan of the first year)
type CategorySeed = (u128, &'static str, &'static str, u8, Option<u128>, CategoryType, i64);

const CATEGORIES: &[CategorySeed] = &[
    (1, "REV", "Revenue", 1, None, CategoryType::Revenue, 0),
    (2, "REV.01", "Patient services", 2, Some(1), CategoryType::Revenue, 0),
    (3, "REV.01.01", "Outpatient fees", 3, Some(2), CategoryType::Revenue, 18_000_000),
    (4, "REV.01.02", "Inpatient fees", 3, Some(2), CategoryType::Revenue, 42_000_000),
    (5, "REV.02", "Government subsidy", 2, Some(1), CategoryType::Revenue, 25_000_000),
    (10, "EXP", "Expense", 1, None, CategoryType::Expense, 0),
    (11, "EXP.01", "Personnel", 2, Some(10), CategoryType::Expense, 0),
    (12, "EXP.01.01", "Salaries", 3, Some(11), CategoryType::Expense, 36_000_000),
    (13, "EXP.01.02", "Overtime", 3, Some(11), CategoryType::Expense, 4_800_000),
    (14, "EXP.02", "Operations", 2, Some(10), CategoryType::Expense, 0),
    (15, "EXP.02.01", "Medical supplies", 3, Some(14), CategoryType::Expense, 0),
    (16, "EXP.02.01.01", "Consumables", 4, Some(15), CategoryType::Expense, 0),
    (17, "EXP.02.01.01.01", "Surgical consumables", 5, Some(16), CategoryType::Expense, 1_200_000),
    (18, "EXP.02.01.02", "Pharmaceuticals", 4, Some(15), CategoryType::Expense, 9_600_000),
    (19, "EXP.02.02", "Utilities", 3, Some(14), CategoryType::Expense, 3_600_000),
];

/// (id, category, code, name, unit, quantity, unit price)
type ItemSeed = (u128, u128, Option<&'static str>, &'static str, &'static str, i64, i64);

const ITEMS: &[ItemSeed] = &[
    (1, 16, Some("MS-001"), "Syringe 5ml", "box", 1_200, 250),
    (2, 16, Some("MS-002"), "Sterile gauze", "pack", 3_000, 120),
    (3, 16, None, "Examination gloves", "box", 2_400, 180),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = budgetlens_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let repo = BudgetRepository::new(db.clone());

    if budget_categories::Entity::find_by_id(category_id(1).into_inner())
        .one(&db)
        .await?
        .is_some()
    {
        println!("  Hierarchy already seeded, skipping...");
        return Ok(());
    }

    println!("Seeding category hierarchy...");
    seed_categories(&repo).await?;

    println!("Seeding procurement items...");
    seed_items(&repo).await?;

    println!("Seeding planned amounts...");
    let plans = seed_plans(&repo).await?;

    println!("Seeding actual entries...");
    seed_actuals(&repo, &plans).await?;

    println!("Seeding complete!");
    Ok(())
}

fn category_id(n: u128) -> CategoryId {
    CategoryId::from_uuid(Uuid::from_u128(n))
}

fn item_id(n: u128) -> ItemId {
    ItemId::from_uuid(Uuid::from_u128(0x1_0000 + n))
}

/// Plan of `base` grown by 5% per year after the first.
fn plan_for_year(base: Decimal, year: i32) -> Decimal {
    let growth = Decimal::new(i64::from(year - PLAN_YEARS.start()) * 5, 2);
    (base * (Decimal::ONE + growth)).round_dp(2)
}

/// Monthly spend pattern between 90% and 114% of the flat monthly target.
fn monthly_factor(index: usize, year: i32) -> Decimal {
    let shift = usize::try_from(year.rem_euclid(7)).unwrap_or_default();
    let percent = 90 + (index * 7 + shift * 3) % 25;
    Decimal::new(i64::try_from(percent).unwrap_or(100), 2)
}

/// Seeds the category hierarchy.
async fn seed_categories(repo: &BudgetRepository) -> anyhow::Result<()> {
    for (id, code, name, level, parent, category_type, _) in CATEGORIES {
        repo.create_category(&BudgetCategory {
            id: category_id(*id),
            name: (*name).to_string(),
            code: (*code).to_string(),
            level: *level,
            category_type: *category_type,
            parent_id: parent.map(category_id),
        })
        .await
        .with_context(|| format!("Failed to insert category {code}"))?;
    }
    println!("  Created {} categories", CATEGORIES.len());
    Ok(())
}

/// Seeds procurement items under the consumables category.
async fn seed_items(repo: &BudgetRepository) -> anyhow::Result<()> {
    for (id, category, code, name, unit, quantity, unit_price) in ITEMS {
        repo.create_item(&ProcurementItem {
            id: item_id(*id),
            category_id: category_id(*category),
            name: (*name).to_string(),
            code: code.map(str::to_string),
            unit: (*unit).to_string(),
            quantity: Decimal::from(*quantity),
            unit_price: Decimal::from(*unit_price),
        })
        .await
        .with_context(|| format!("Failed to insert item {name}"))?;
    }
    println!("  Created {} procurement items", ITEMS.len());
    Ok(())
}

/// Seeds planned amounts and returns every plan written.
async fn seed_plans(repo: &BudgetRepository) -> anyhow::Result<Vec<PlanRecord>> {
    let mut owners: Vec<(PlanOwner, Decimal)> = CATEGORIES
        .iter()
        .filter(|seed| seed.6 > 0)
        .map(|seed| (PlanOwner::Category(category_id(seed.0)), Decimal::from(seed.6)))
        .collect();
    owners.extend(ITEMS.iter().map(|(id, _, _, _, _, quantity, unit_price)| {
        (
            PlanOwner::Item(item_id(*id)),
            Decimal::from(*quantity) * Decimal::from(*unit_price),
        )
    }));

    let mut plans = Vec::new();
    for year in PLAN_YEARS {
        let fiscal_year = FiscalYear::new(year)?;
        for (owner, base) in &owners {
            let plan = PlanRecord {
                id: PlanId::new(),
                fiscal_year,
                amount: plan_for_year(*base, year),
                owner: *owner,
            };
            repo.create_plan(&plan).await?;
            plans.push(plan);
        }
    }
    println!("  Created {} plan records", plans.len());
    Ok(plans)
}

/// Seeds monthly actuals for every plan before and including the current year.
async fn seed_actuals(repo: &BudgetRepository, plans: &[PlanRecord]) -> anyhow::Result<()> {
    let recorded_by = UserId::from_uuid(Uuid::from_u128(SEED_USER_ID));
    let twelve = Decimal::from(12);
    let mut inserted = 0;

    for plan in plans.iter().filter(|p| p.fiscal_year.value() <= CURRENT_YEAR) {
        let months = if plan.fiscal_year.value() == CURRENT_YEAR {
            CURRENT_YEAR_MONTHS
        } else {
            12
        };
        let target = plan.amount / twelve;
        let (category, item) = match plan.owner {
            PlanOwner::Category(id) => (Some(id), None),
            PlanOwner::Item(id) => (None, Some(id)),
        };

        for month in plan.fiscal_year.months().into_iter().take(months) {
            let index = month_index(month)?;
            let year_ce = plan.fiscal_year.calendar_year_ce(month)?;
            let created_at = Utc
                .with_ymd_and_hms(year_ce, month, 28, 9, 0, 0)
                .single()
                .context("invalid seed timestamp")?;

            repo.insert_actual_entry(&ActualEntry {
                id: ActualEntryId::new(),
                fiscal_year: plan.fiscal_year,
                month,
                amount: (target * monthly_factor(index, plan.fiscal_year.value())).round_dp(2),
                category_id: category,
                item_id: item,
                quantity: None,
                notes: Some("seeded".to_string()),
                recorded_by,
                created_at,
            })
            .await?;
            inserted += 1;
        }
    }
    println!("  Created {inserted} actual entries");
    Ok(())
}
