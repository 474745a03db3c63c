//! Tests del sincronizador contra un Postgres real.
//!
//! Solo corren con DATABASE_URL apuntando a una base de datos de test; sin
//! ella cada test retorna sin aserciones. El schema se aplica con la
//! migración inicial, serializada con un advisory lock para que los tests
//! del binario no compitan por el DDL.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use uuid::Uuid;

use rental_backend::models::booking::BookingStatus;
use rental_backend::services::availability_service::AvailabilityService;
use rental_backend::utils::errors::AppError;

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .ok()?;

    let mut conn = pool.acquire().await.ok()?;
    let ddl = format!(
        "SELECT pg_advisory_lock(719);\n{}\nSELECT pg_advisory_unlock(719);",
        include_str!("../migrations/0001_init.sql")
    );
    conn.execute(ddl.as_str()).await.ok()?;

    Some(pool)
}

async fn insert_vehicle(pool: &PgPool) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO vehicles
            (id, make, model, year, price_per_day, available, version, created_at, updated_at)
        VALUES ($1, 'Renault', 'Clio', 2022, 45.00, TRUE, 0, now(), now())
        "#,
    )
    .bind(id)
    .execute(pool)
    .await
    .unwrap();
    id
}

async fn insert_pending_booking(pool: &PgPool, vehicle_id: Uuid, start: &str, end: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO bookings
            (id, vehicle_id, start_date, end_date, status, total_price,
             customer_name, customer_email, customer_phone, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 'pending', 100.00,
                'Alice Doe', 'alice@example.com', '+33600000000', now(), now())
        "#,
    )
    .bind(id)
    .bind(vehicle_id)
    .bind(start.parse::<NaiveDate>().unwrap())
    .bind(end.parse::<NaiveDate>().unwrap())
    .execute(pool)
    .await
    .unwrap();
    id
}

/// Dos aprobaciones concurrentes de reservas pending solapadas del mismo
/// vehículo: el lock de la fila del vehículo serializa ambas transacciones
/// y exactamente una gana; la otra recibe Conflict.
#[tokio::test]
async fn test_concurrent_approvals_reject_double_booking() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let vehicle_id = insert_vehicle(&pool).await;
    let b1 = insert_pending_booking(&pool, vehicle_id, "2030-01-01", "2030-01-05").await;
    let b2 = insert_pending_booking(&pool, vehicle_id, "2030-01-03", "2030-01-08").await;

    let s1 = AvailabilityService::new(pool.clone());
    let s2 = AvailabilityService::new(pool.clone());
    let (r1, r2) = tokio::join!(
        s1.apply_booking_status(b1, BookingStatus::Approved),
        s2.apply_booking_status(b2, BookingStatus::Approved),
    );

    let winners = r1.is_ok() as usize + r2.is_ok() as usize;
    assert_eq!(winners, 1, "exactly one overlapping approval must win");

    let loser = if r1.is_err() {
        r1.unwrap_err()
    } else {
        r2.unwrap_err()
    };
    assert!(matches!(loser, AppError::Conflict(_)));
}

/// Ciclo aprobada -> completada: la transición es válida y el vehículo
/// vuelve a quedar disponible, con bump de versión en cada escritura.
#[tokio::test]
async fn test_completed_after_approved_frees_vehicle() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let vehicle_id = insert_vehicle(&pool).await;
    let booking_id = insert_pending_booking(&pool, vehicle_id, "2030-02-01", "2030-02-05").await;

    let service = AvailabilityService::new(pool.clone());

    let (_, vehicle) = service
        .apply_booking_status(booking_id, BookingStatus::Approved)
        .await
        .unwrap();
    assert_eq!(vehicle.available, Some(false));
    let version_after_approve = vehicle.version;

    let (booking, vehicle) = service
        .apply_booking_status(booking_id, BookingStatus::Completed)
        .await
        .unwrap();
    assert_eq!(booking.status, "completed");
    assert_eq!(vehicle.available, Some(true));
    assert_eq!(vehicle.version, version_after_approve + 1);
}

/// El alta de reserva también rechaza el solape con una reserva ocupante,
/// dentro de su propia transacción con el lock del vehículo.
#[tokio::test]
async fn test_create_rejects_overlap_with_occupying_booking() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let vehicle_id = insert_vehicle(&pool).await;
    let booking_id = insert_pending_booking(&pool, vehicle_id, "2030-03-01", "2030-03-05").await;

    let service = AvailabilityService::new(pool.clone());
    service
        .apply_booking_status(booking_id, BookingStatus::Confirmed)
        .await
        .unwrap();

    let result = service
        .create_booking(
            vehicle_id,
            "2030-03-04".parse().unwrap(),
            "2030-03-09".parse().unwrap(),
            Decimal::new(10000, 2),
            "Bob Roe".to_string(),
            "bob@example.com".to_string(),
            "+33600000001".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}
