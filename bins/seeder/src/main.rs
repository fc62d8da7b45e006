//! Database seeder for Konak development and testing.
//!
//! Seeds a demo manager account, one organization with a handful of units
//! and residents, plus a month of dues and expenses for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, Utc};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use konak_core::auth::{UserRole, hash_password};
use konak_db::entities::{
    dues, expenses, organizations, residents, sea_orm_active_enums::DueStatus, units, users,
};

/// Demo manager ID (consistent for all seeds)
const DEMO_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo organization ID (consistent for all seeds)
const DEMO_ORG_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = konak_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo manager...");
    seed_manager(&db).await;

    println!("Seeding demo organization...");
    seed_organization(&db).await;

    println!("Seeding units and residents...");
    let unit_ids = seed_units(&db).await;

    println!("Seeding dues...");
    seed_dues(&db, &unit_ids).await;

    println!("Seeding expenses...");
    seed_expenses(&db).await;

    println!("Seeding complete!");
}

fn demo_user_id() -> Uuid {
    Uuid::parse_str(DEMO_USER_ID).unwrap()
}

fn demo_org_id() -> Uuid {
    Uuid::parse_str(DEMO_ORG_ID).unwrap()
}

/// Seeds a demo manager account (email demo@konak.dev, password "demo1234").
async fn seed_manager(db: &DatabaseConnection) {
    if users::Entity::find_by_id(demo_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo manager already exists, skipping...");
        return;
    }

    let password_hash = hash_password("demo1234").expect("Failed to hash demo password");

    let user = users::ActiveModel {
        id: Set(demo_user_id()),
        email: Set("demo@konak.dev".to_string()),
        phone: Set("+905550000000".to_string()),
        password_hash: Set(password_hash),
        full_name: Set("Demo Manager".to_string()),
        role: Set(UserRole::Manager.as_str().to_string()),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert demo manager: {e}");
    } else {
        println!("  Created demo manager: demo@konak.dev");
    }
}

/// Seeds the demo organization managed by the demo account.
async fn seed_organization(db: &DatabaseConnection) {
    if organizations::Entity::find_by_id(demo_org_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo organization already exists, skipping...");
        return;
    }

    let org = organizations::ActiveModel {
        id: Set(demo_org_id()),
        name: Set("Cinar Apartments".to_string()),
        address: Set("Atasehir, Istanbul".to_string()),
        total_units: Set(4),
        monthly_due_amount: Set(dec!(750)),
        manager_id: Set(demo_user_id()),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = org.insert(db).await {
        eprintln!("Failed to insert demo organization: {e}");
    } else {
        println!("  Created demo organization: Cinar Apartments");
    }
}

/// Seeds four units, the first two with residents assigned.
async fn seed_units(db: &DatabaseConnection) -> Vec<Uuid> {
    let residents_data = [
        ("Ayse Yilmaz", "+905551111111"),
        ("Mehmet Demir", "+905552222222"),
    ];
    let mut unit_ids = Vec::new();

    for (i, unit_number) in ["A-1", "A-2", "B-1", "B-2"].iter().enumerate() {
        let unit_id = Uuid::new_v4();
        unit_ids.push(unit_id);

        let resident_id = if let Some((name, phone)) = residents_data.get(i) {
            let resident_id = Uuid::new_v4();
            let resident = residents::ActiveModel {
                id: Set(resident_id),
                organization_id: Set(demo_org_id()),
                full_name: Set((*name).to_string()),
                phone: Set((*phone).to_string()),
                email: Set(None),
                unit_id: Set(Some(unit_id)),
                created_at: Set(Utc::now().into()),
                updated_at: Set(Utc::now().into()),
            };
            if let Err(e) = resident.insert(db).await {
                eprintln!("Failed to insert resident {name}: {e}");
            }
            Some(resident_id)
        } else {
            None
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let floor = (i / 2) as i32;
        let unit = units::ActiveModel {
            id: Set(unit_id),
            organization_id: Set(demo_org_id()),
            unit_number: Set((*unit_number).to_string()),
            floor: Set(floor),
            resident_id: Set(resident_id),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };
        if let Err(e) = unit.insert(db).await {
            eprintln!("Failed to insert unit {unit_number}: {e}");
        } else {
            println!("  Created unit {unit_number}");
        }
    }

    unit_ids
}

/// Seeds this month's dues: first unit paid, the rest pending.
async fn seed_dues(db: &DatabaseConnection, unit_ids: &[Uuid]) {
    let today = Utc::now().date_naive();
    let due_date = today.with_day(1).unwrap_or(today);

    for (i, unit_id) in unit_ids.iter().enumerate() {
        let paid = i == 0;
        let due = dues::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(demo_org_id()),
            unit_id: Set(*unit_id),
            amount: Set(dec!(750)),
            due_date: Set(due_date),
            status: Set(if paid {
                DueStatus::Paid
            } else {
                DueStatus::Pending
            }),
            paid_at: Set(paid.then(|| Utc::now().into())),
            payment_method: Set(paid.then_some(
                konak_db::entities::sea_orm_active_enums::PaymentMethod::Transfer,
            )),
            description: Set(Some("Monthly maintenance due".to_string())),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };
        if let Err(e) = due.insert(db).await {
            eprintln!("Failed to insert due: {e}");
        }
    }

    println!("  Created {} dues", unit_ids.len());
}

/// Seeds a couple of expenses for the current month.
async fn seed_expenses(db: &DatabaseConnection) {
    let today = Utc::now().date_naive();
    let rows = [
        ("cleaning", dec!(400), "Stairwell cleaning"),
        ("electricity", dec!(650), "Common area electricity"),
    ];

    for (category, amount, description) in rows {
        let expense = expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(demo_org_id()),
            category: Set(category.to_string()),
            amount: Set(amount),
            expense_date: Set(today),
            description: Set(Some(description.to_string())),
            receipt_url: Set(None),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };
        if let Err(e) = expense.insert(db).await {
            eprintln!("Failed to insert expense {category}: {e}");
        } else {
            println!("  Created expense: {category}");
        }
    }
}
