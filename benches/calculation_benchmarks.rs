//! Performance benchmarks for the payroll engine.
//!
//! - Pure net pay calculation
//! - `POST /payroll/calculate` through the router
//! - One scheduler tick over chunks of increasing size
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, CalculationRequest, create_router};
use payroll_engine::calculation::calculate_net_pay;
use payroll_engine::config::{ConfigLoader, SchedulerSettings};
use payroll_engine::models::{
    DisbursementOutcome, Employee, EmployeeStatus, PayGroup, PayPeriod, PaymentCycle,
};
use payroll_engine::payroll::PayrollService;
use payroll_engine::store::InMemoryStore;
use payroll_engine::submission::{
    BatchSubmitter, FixedOutcome, IntegrationService, LocalDisbursementClient,
};

use axum::{body::Body, http::Request};
use chrono::NaiveDate;
use tower::ServiceExt;

fn monthly_group() -> PayGroup {
    PayGroup {
        id: "pg_monthly".to_string(),
        name: "Monthly".to_string(),
        payment_cycle: PaymentCycle::Monthly,
        base_tax_rate: Some(Decimal::new(1000, 2)),
        benefit_rate: Some(Decimal::new(500, 2)),
        deduction_rate: Some(Decimal::new(200, 2)),
    }
}

/// Benchmark: net pay for one gross amount.
fn bench_net_pay(c: &mut Criterion) {
    let group = monthly_group();
    let gross = Decimal::new(512_345, 2);

    c.bench_function("net_pay", |b| {
        b.iter(|| black_box(calculate_net_pay(black_box(gross), &group)))
    });
}

/// Benchmark: calculate endpoint end to end.
fn bench_calculate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let state = AppState::with_outcomes(&config, Arc::new(FixedOutcome(DisbursementOutcome::Success)))
        .expect("Failed to build state");
    let router = create_router(state);
    let request = CalculationRequest {
        employee_id: "emp_001".to_string(),
        pay_period_start: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        pay_period_end: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
    };
    let body = serde_json::to_string(&request).unwrap();

    c.bench_function("calculate_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: one tick submitting `n` freshly calculated runs.
fn bench_submission_tick(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let march = PayPeriod::new(
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
    );

    let mut group = c.benchmark_group("submission_tick");
    group.sample_size(20);

    for runs in [10usize, 100, 1000] {
        group.throughput(Throughput::Elements(runs as u64));
        group.bench_with_input(BenchmarkId::new("runs", runs), &runs, |b, &runs| {
            b.to_async(&rt).iter(|| async move {
                let employees = (0..runs)
                    .map(|i| Employee {
                        id: format!("emp_{:04}", i),
                        name: String::new(),
                        status: EmployeeStatus::Active,
                        pay_group_id: "pg_monthly".to_string(),
                        base_salary: Decimal::new(500_000, 2),
                    })
                    .collect::<Vec<_>>();
                let ids: Vec<String> = employees.iter().map(|e| e.id.clone()).collect();
                let store = Arc::new(InMemoryStore::with_directory(employees, vec![monthly_group()]));

                let payroll = PayrollService::new(store.clone(), store.clone());
                for id in &ids {
                    payroll.calculate(id, march).await.unwrap();
                }

                let integration = IntegrationService::new(
                    store.clone(),
                    Arc::new(FixedOutcome(DisbursementOutcome::Success)),
                );
                let settings = SchedulerSettings {
                    chunk_size: runs,
                    ..SchedulerSettings::default()
                };
                let submitter = BatchSubmitter::new(
                    store.clone(),
                    Arc::new(LocalDisbursementClient::new(integration)),
                    &settings,
                );
                black_box(submitter.submit_pending().await.unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_net_pay,
    bench_calculate_endpoint,
    bench_submission_tick,
);
criterion_main!(benches);
