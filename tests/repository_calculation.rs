use calculator_service::domain::entities::{CalculationFilter, NewCalculation, NewUser};
use calculator_service::domain::operation::CalculationType;
use calculator_service::domain::repositories::{CalculationRepository, UserRepository};
use calculator_service::infrastructure::persistence::{
    PgCalculationRepository, PgUserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

async fn create_user(pool: &Arc<PgPool>, username: &str) -> Uuid {
    PgUserRepository::new(pool.clone())
        .create(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap()
        .id
}

fn new_calculation(user_id: Uuid, calculation_type: CalculationType, inputs: &[f64]) -> NewCalculation {
    NewCalculation {
        user_id,
        calculation_type,
        inputs: inputs.to_vec(),
        result: calculation_type.compute(inputs).unwrap(),
    }
}

fn all() -> CalculationFilter {
    CalculationFilter {
        calculation_type: None,
        offset: 0,
        limit: 100,
    }
}

#[sqlx::test]
async fn test_create_and_find(pool: PgPool) {
    let pool = Arc::new(pool);
    let user_id = create_user(&pool, "calcuser").await;
    let repo = PgCalculationRepository::new(pool);

    let created = repo
        .create(new_calculation(user_id, CalculationType::Addition, &[10.5, 3.0, 2.0]))
        .await
        .unwrap();

    assert_eq!(created.calculation_type, CalculationType::Addition);
    assert_eq!(created.inputs, vec![10.5, 3.0, 2.0]);
    assert_eq!(created.result, 15.5);

    let found = repo.find_for_user(user_id, created.id).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.inputs, created.inputs);
}

#[sqlx::test]
async fn test_find_is_scoped_to_owner(pool: PgPool) {
    let pool = Arc::new(pool);
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let repo = PgCalculationRepository::new(pool);

    let created = repo
        .create(new_calculation(alice, CalculationType::Division, &[9.0, 3.0]))
        .await
        .unwrap();

    assert!(repo.find_for_user(bob, created.id).await.unwrap().is_none());
    assert!(!repo.delete_for_user(bob, created.id).await.unwrap());
    assert!(repo
        .update_inputs(bob, created.id, vec![1.0, 1.0], 1.0)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test]
async fn test_list_newest_first_with_filter(pool: PgPool) {
    let pool = Arc::new(pool);
    let user_id = create_user(&pool, "calcuser").await;
    let repo = PgCalculationRepository::new(pool);

    for (op, inputs) in [
        (CalculationType::Addition, [1.0, 1.0]),
        (CalculationType::Modulus, [10.0, 3.0]),
        (CalculationType::Addition, [2.0, 2.0]),
    ] {
        repo.create(new_calculation(user_id, op, &inputs)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let listed = repo.list_for_user(user_id, all()).await.unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].result, 4.0);
    assert_eq!(listed[2].result, 2.0);

    let additions = repo
        .list_for_user(
            user_id,
            CalculationFilter {
                calculation_type: Some(CalculationType::Addition),
                ..all()
            },
        )
        .await
        .unwrap();
    assert_eq!(additions.len(), 2);

    let page = repo
        .list_for_user(
            user_id,
            CalculationFilter {
                offset: 2,
                limit: 2,
                ..all()
            },
        )
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
}

#[sqlx::test]
async fn test_update_inputs(pool: PgPool) {
    let pool = Arc::new(pool);
    let user_id = create_user(&pool, "calcuser").await;
    let repo = PgCalculationRepository::new(pool);

    let created = repo
        .create(new_calculation(user_id, CalculationType::Multiplication, &[2.0, 3.0]))
        .await
        .unwrap();

    let updated = repo
        .update_inputs(user_id, created.id, vec![4.0, 5.0, 6.0], 120.0)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.inputs, vec![4.0, 5.0, 6.0]);
    assert_eq!(updated.result, 120.0);
    assert_eq!(updated.calculation_type, CalculationType::Multiplication);
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test]
async fn test_delete(pool: PgPool) {
    let pool = Arc::new(pool);
    let user_id = create_user(&pool, "calcuser").await;
    let repo = PgCalculationRepository::new(pool);

    let created = repo
        .create(new_calculation(user_id, CalculationType::Subtraction, &[5.0, 1.0]))
        .await
        .unwrap();

    assert!(repo.delete_for_user(user_id, created.id).await.unwrap());
    assert!(!repo.delete_for_user(user_id, created.id).await.unwrap());
    assert!(repo.find_for_user(user_id, created.id).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_count_by_type(pool: PgPool) {
    let pool = Arc::new(pool);
    let user_id = create_user(&pool, "calcuser").await;
    let repo = PgCalculationRepository::new(pool);

    repo.create(new_calculation(user_id, CalculationType::Addition, &[1.0, 2.0]))
        .await
        .unwrap();
    repo.create(new_calculation(user_id, CalculationType::Addition, &[3.0, 4.0]))
        .await
        .unwrap();
    repo.create(new_calculation(user_id, CalculationType::Division, &[8.0, 2.0]))
        .await
        .unwrap();

    let counts = repo.count_by_type().await.unwrap();

    assert!(counts.contains(&(CalculationType::Addition, 2)));
    assert!(counts.contains(&(CalculationType::Division, 1)));
    assert_eq!(counts.len(), 2);
}

#[sqlx::test]
async fn test_deleting_user_cascades(pool: PgPool) {
    let pool = Arc::new(pool);
    let user_id = create_user(&pool, "calcuser").await;
    let repo = PgCalculationRepository::new(pool.clone());

    let created = repo
        .create(new_calculation(user_id, CalculationType::Addition, &[1.0, 2.0]))
        .await
        .unwrap();

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool.as_ref())
        .await
        .unwrap();

    assert!(repo.find_for_user(user_id, created.id).await.unwrap().is_none());
}
