use bakery_orders::auth::{AuthError, OperatorSession};
use bakery_orders::baking_day_actor::BakingDayError;
use bakery_orders::bread_actor::BreadTypeError;
use bakery_orders::clients::CatalogError;
use bakery_orders::clock::FixedClock;
use bakery_orders::config::BakeryConfig;
use bakery_orders::lifecycle::{BakerySystem, HealthStatus, MemoryStores};
use bakery_orders::model::{
    BakingDay, BakingDayId, BreadOption, BreadTypeId, LineRequest, OrderSubmission, ShareToken,
};
use bakery_orders::order_actor::OrderError;
use bakery_orders::policy::OrderPolicy;
use bakery_orders::reporting::{compute_day_summary, UNKNOWN_BREAD};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::sync::Arc;

const PASSWORD: &str = "crust";

/// Wednesday 2024-03-06, 08:00. "Monday" resolves to 2024-03-11.
fn wednesday_morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 6)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

struct Bakery {
    system: BakerySystem,
    stores: MemoryStores,
    clock: Arc<FixedClock>,
    session: OperatorSession,
}

fn start(policy: OrderPolicy) -> Bakery {
    let mut config = BakeryConfig::for_test(PASSWORD);
    config.ordering = policy;
    let stores = MemoryStores::new();
    let clock = Arc::new(FixedClock::new(wednesday_morning()));
    let system = BakerySystem::with_stores(&config, stores.stores(), clock.clone());
    let session = system.login(PASSWORD).unwrap();
    Bakery {
        system,
        stores,
        clock,
        session,
    }
}

impl Bakery {
    async fn bread(&self, name: &str) -> BreadTypeId {
        self.system
            .catalog
            .create_bread_type(&self.session, name)
            .await
            .unwrap()
    }

    async fn day(&self, weekday: &str, options: Vec<BreadOption>) -> BakingDay {
        let id = self
            .system
            .catalog
            .create_baking_day(&self.session, weekday, options)
            .await
            .unwrap();
        self.stored_day(&id)
    }

    fn stored_day(&self, id: &BakingDayId) -> BakingDay {
        self.stores
            .baking_days
            .snapshot()
            .into_iter()
            .find(|day| &day.id == id)
            .unwrap()
    }

    async fn order(
        &self,
        token: &ShareToken,
        name: &str,
        lines: &[(&BreadTypeId, u32)],
    ) -> Result<(), CatalogError> {
        let submission = OrderSubmission {
            share_token: token.clone(),
            customer_name: name.to_string(),
            customer_contact: "555-0100".to_string(),
            lines: lines
                .iter()
                .map(|(bread, quantity)| LineRequest::new((*bread).clone(), *quantity))
                .collect(),
        };
        self.system.catalog.submit_order(submission).await.map(|_| ())
    }

    async fn available(&self, token: &ShareToken) -> Vec<i64> {
        self.system
            .catalog
            .order_page(token)
            .await
            .unwrap()
            .options
            .into_iter()
            .map(|option| option.availability.available)
            .collect()
    }
}

#[tokio::test]
async fn test_sourdough_scenario() {
    let bakery = start(OrderPolicy::strict());
    let sourdough = bakery.bread("Sourdough").await;
    let monday = bakery
        .day("Monday", vec![BreadOption::new(sourdough.clone(), 3)])
        .await;
    assert_eq!(monday.date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    let token = monday.share_token.clone();

    bakery.order(&token, "Alice", &[(&sourdough, 2)]).await.unwrap();
    assert_eq!(bakery.available(&token).await, vec![1]);

    let bob = bakery.order(&token, "Bob", &[(&sourdough, 2)]).await;
    assert_eq!(
        bob,
        Err(CatalogError::Order(OrderError::CapacityExceeded {
            bread_type_id: sourdough.clone(),
            requested: 2,
            available: 1,
        }))
    );

    let alice_again = bakery.order(&token, "Alice", &[(&sourdough, 1)]).await;
    assert_eq!(
        alice_again,
        Err(CatalogError::Order(OrderError::DuplicateCustomer("Alice".into())))
    );

    // Rejected submissions left nothing behind
    assert_eq!(bakery.stores.orders.snapshot().len(), 1);
    bakery.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_quota_is_enforced_regardless_of_split() {
    let bakery = start(OrderPolicy::relaxed());
    let rye = bakery.bread("Rye").await;
    let spelt = bakery.bread("Spelt").await;
    let day = bakery
        .day(
            "Friday",
            vec![BreadOption::new(rye.clone(), 20), BreadOption::new(spelt.clone(), 20)],
        )
        .await;
    let token = &day.share_token;

    let split = bakery.order(token, "Carol", &[(&rye, 3), (&spelt, 3)]).await;
    assert_eq!(
        split,
        Err(CatalogError::Order(OrderError::QuotaExceeded {
            requested: 6,
            limit: 5
        }))
    );

    let repeated = bakery
        .order(token, "Carol", &[(&rye, 2), (&rye, 2), (&rye, 2)])
        .await;
    assert!(matches!(
        repeated,
        Err(CatalogError::Order(OrderError::QuotaExceeded { requested: 6, .. }))
    ));

    bakery.order(token, "Carol", &[(&rye, 3), (&spelt, 2)]).await.unwrap();
    assert_eq!(bakery.stores.orders.snapshot().len(), 2);
}

#[tokio::test]
async fn test_strict_quota_is_two_loaves() {
    let bakery = start(OrderPolicy::strict());
    let rye = bakery.bread("Rye").await;
    let spelt = bakery.bread("Spelt").await;
    let day = bakery
        .day(
            "Monday",
            vec![BreadOption::new(rye.clone(), 10), BreadOption::new(spelt.clone(), 10)],
        )
        .await;

    let result = bakery
        .order(&day.share_token, "Dan", &[(&rye, 1), (&spelt, 1), (&rye, 1)])
        .await;

    assert_eq!(
        result,
        Err(CatalogError::Order(OrderError::QuotaExceeded {
            requested: 3,
            limit: 2
        }))
    );
}

#[tokio::test]
async fn test_oversized_quantities_are_rejected_and_ordering_continues() {
    let bakery = start(OrderPolicy::strict());
    let rye = bakery.bread("Rye").await;
    let spelt = bakery.bread("Spelt").await;
    let day = bakery
        .day(
            "Monday",
            vec![BreadOption::new(rye.clone(), 10), BreadOption::new(spelt.clone(), 10)],
        )
        .await;
    let token = &day.share_token;

    let huge = bakery
        .order(token, "Mallory", &[(&rye, u32::MAX), (&spelt, 1)])
        .await;
    assert_eq!(
        huge,
        Err(CatalogError::Order(OrderError::QuotaExceeded {
            requested: u32::MAX,
            limit: 2
        }))
    );

    let wrapping = bakery
        .order(token, "Mallory", &[(&rye, 1 << 31), (&spelt, 1 << 31)])
        .await;
    assert!(matches!(
        wrapping,
        Err(CatalogError::Order(OrderError::QuotaExceeded { .. }))
    ));

    // The order actor is still serving requests
    bakery.order(token, "Alice", &[(&rye, 1)]).await.unwrap();
    assert_eq!(bakery.available(token).await, vec![9, 10]);
    assert_eq!(bakery.stores.orders.snapshot().len(), 1);
}

#[tokio::test]
async fn test_day_report_with_caps_near_u32_max() {
    let bakery = start(OrderPolicy::strict());
    let rye = bakery.bread("Rye").await;
    let spelt = bakery.bread("Spelt").await;
    let day = bakery
        .day(
            "Monday",
            vec![
                BreadOption::new(rye.clone(), u32::MAX),
                BreadOption::new(spelt.clone(), u32::MAX),
            ],
        )
        .await;
    bakery.order(&day.share_token, "Alice", &[(&rye, 2)]).await.unwrap();

    let report = bakery
        .system
        .catalog
        .day_report(&bakery.session, day.id.clone())
        .await
        .unwrap();

    assert_eq!(report.summary.max_total_loaves, u32::MAX);
    assert_eq!(report.summary.total_loaves, 2);
}

#[tokio::test]
async fn test_deadline_boundary() {
    let bakery = start(OrderPolicy::strict());
    let rye = bakery.bread("Rye").await;
    let day = bakery.day("Monday", vec![BreadOption::new(rye.clone(), 10)]).await;
    let deadline = OrderPolicy::strict().deadline_for(day.date);
    assert_eq!(
        deadline,
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap()
    );

    bakery.clock.set(deadline - TimeDelta::seconds(1));
    assert!(bakery.system.catalog.order_page(&day.share_token).await.unwrap().is_open());
    bakery.order(&day.share_token, "Erin", &[(&rye, 1)]).await.unwrap();

    bakery.clock.set(deadline);
    assert!(!bakery.system.catalog.order_page(&day.share_token).await.unwrap().is_open());
    let late = bakery.order(&day.share_token, "Frank", &[(&rye, 1)]).await;
    assert_eq!(late, Err(CatalogError::Order(OrderError::WindowClosed { deadline })));

    bakery.clock.advance(TimeDelta::days(1));
    assert!(bakery.order(&day.share_token, "Frank", &[(&rye, 1)]).await.is_err());
}

#[tokio::test]
async fn test_relaxed_deadline_is_36_hours() {
    let bakery = start(OrderPolicy::relaxed());
    let rye = bakery.bread("Rye").await;
    // Friday 2024-03-08 closes Wednesday 2024-03-06 at 12:00
    let day = bakery.day("Friday", vec![BreadOption::new(rye.clone(), 10)]).await;

    bakery.clock.set(
        NaiveDate::from_ymd_opt(2024, 3, 6)
            .unwrap()
            .and_hms_opt(11, 59, 59)
            .unwrap(),
    );
    bakery.order(&day.share_token, "Gail", &[(&rye, 1)]).await.unwrap();

    bakery.clock.advance(TimeDelta::seconds(1));
    assert!(matches!(
        bakery.order(&day.share_token, "Gail", &[(&rye, 1)]).await,
        Err(CatalogError::Order(OrderError::WindowClosed { .. }))
    ));
}

#[tokio::test]
async fn test_duplicate_customer_is_case_insensitive() {
    let bakery = start(OrderPolicy::strict());
    let rye = bakery.bread("Rye").await;
    let day = bakery.day("Monday", vec![BreadOption::new(rye.clone(), 10)]).await;
    let token = &day.share_token;

    bakery.order(token, "Alice", &[(&rye, 1)]).await.unwrap();

    assert!(matches!(
        bakery.order(token, "  aLICE ", &[(&rye, 1)]).await,
        Err(CatalogError::Order(OrderError::DuplicateCustomer(_)))
    ));
    assert!(bakery.system.catalog.has_ordered(token, "ALICE").await.unwrap());
    assert!(!bakery.system.catalog.has_ordered(token, "Bob").await.unwrap());
}

#[tokio::test]
async fn test_relaxed_policy_allows_repeat_customers() {
    let bakery = start(OrderPolicy::relaxed());
    let rye = bakery.bread("Rye").await;
    let day = bakery.day("Monday", vec![BreadOption::new(rye.clone(), 10)]).await;

    bakery.order(&day.share_token, "Alice", &[(&rye, 1)]).await.unwrap();
    bakery.order(&day.share_token, "alice", &[(&rye, 1)]).await.unwrap();

    assert_eq!(bakery.available(&day.share_token).await, vec![8]);
}

#[tokio::test]
async fn test_validation_errors() {
    let bakery = start(OrderPolicy::strict());
    let rye = bakery.bread("Rye").await;
    let spelt = bakery.bread("Spelt").await;
    let day = bakery.day("Monday", vec![BreadOption::new(rye.clone(), 10)]).await;
    let token = &day.share_token;

    for (name, lines) in [
        ("", vec![(&rye, 1)]),
        ("Hank", vec![]),
        ("Hank", vec![(&rye, 0)]),
        ("Hank", vec![(&spelt, 1)]),
    ] {
        let result = bakery.order(token, name, &lines).await;
        assert!(
            matches!(result, Err(CatalogError::Order(OrderError::ValidationError(_)))),
            "{name:?} {lines:?} -> {result:?}"
        );
    }

    let no_contact = OrderSubmission {
        share_token: token.clone(),
        customer_name: "Hank".into(),
        customer_contact: "   ".into(),
        lines: vec![LineRequest::new(rye.clone(), 1)],
    };
    assert!(matches!(
        bakery.system.catalog.submit_order(no_contact).await,
        Err(CatalogError::Order(OrderError::ValidationError(_)))
    ));

    assert!(bakery.stores.orders.snapshot().is_empty());
}

#[tokio::test]
async fn test_unknown_share_token() {
    let bakery = start(OrderPolicy::strict());
    let rye = bakery.bread("Rye").await;
    let bogus = ShareToken::from("not-a-token");

    assert!(matches!(
        bakery.order(&bogus, "Ida", &[(&rye, 1)]).await,
        Err(CatalogError::Order(OrderError::NotFound(_)))
    ));
    assert!(matches!(
        bakery.system.catalog.order_page(&bogus).await,
        Err(CatalogError::BakingDay(BakingDayError::NotFound(_)))
    ));
}

#[tokio::test]
async fn test_availability_is_idempotent() {
    let bakery = start(OrderPolicy::relaxed());
    let rye = bakery.bread("Rye").await;
    let day = bakery.day("Monday", vec![BreadOption::new(rye.clone(), 7)]).await;
    bakery.order(&day.share_token, "Jo", &[(&rye, 3)]).await.unwrap();

    let first = bakery.system.catalog.order_page(&day.share_token).await.unwrap();
    let second = bakery.system.catalog.order_page(&day.share_token).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.options[0].availability.ordered_quantity, 3);
    assert_eq!(first.options[0].availability.available, 4);
}

#[tokio::test]
async fn test_delete_baking_day_cascades_to_orders() {
    let bakery = start(OrderPolicy::relaxed());
    let rye = bakery.bread("Rye").await;
    let monday = bakery.day("Monday", vec![BreadOption::new(rye.clone(), 10)]).await;
    let friday = bakery.day("Friday", vec![BreadOption::new(rye.clone(), 10)]).await;

    bakery.order(&monday.share_token, "Kim", &[(&rye, 2)]).await.unwrap();
    bakery.order(&monday.share_token, "Lee", &[(&rye, 1)]).await.unwrap();
    bakery.order(&friday.share_token, "Kim", &[(&rye, 1)]).await.unwrap();

    let report = bakery
        .system
        .catalog
        .day_report(&bakery.session, monday.id.clone())
        .await
        .unwrap();
    assert_eq!(report.summary.total_orders, 2);
    assert_eq!(report.summary.total_loaves, 3);

    let purged = bakery
        .system
        .catalog
        .delete_baking_day(&bakery.session, monday.id.clone())
        .await
        .unwrap();
    assert_eq!(purged, 2);

    let lines = bakery.stores.orders.snapshot();
    assert!(lines.iter().all(|line| line.baking_day_id == friday.id));
    let summary = compute_day_summary(&monday, &lines);
    assert_eq!((summary.total_orders, summary.total_loaves), (0, 0));

    assert!(matches!(
        bakery.system.catalog.day_report(&bakery.session, monday.id.clone()).await,
        Err(CatalogError::BakingDay(BakingDayError::NotFound(_)))
    ));
    assert!(matches!(
        bakery.order(&monday.share_token, "Max", &[(&rye, 1)]).await,
        Err(CatalogError::Order(OrderError::NotFound(_)))
    ));
    assert!(matches!(
        bakery.system.catalog.delete_baking_day(&bakery.session, monday.id).await,
        Err(CatalogError::BakingDay(BakingDayError::NotFound(_)))
    ));
}

#[tokio::test]
async fn test_concurrent_submissions_never_overcommit() {
    let bakery = start(OrderPolicy::relaxed());
    let rye = bakery.bread("Rye").await;
    let day = bakery.day("Monday", vec![BreadOption::new(rye.clone(), 10)]).await;

    let mut handles = vec![];
    for i in 0..30 {
        let catalog = bakery.system.catalog.clone();
        let submission = OrderSubmission {
            share_token: day.share_token.clone(),
            customer_name: format!("customer-{i}"),
            customer_contact: "555".into(),
            lines: vec![LineRequest::new(rye.clone(), 1 + i % 2)],
        };
        handles.push(tokio::spawn(async move { catalog.submit_order(submission).await }));
    }

    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => {}
            Err(CatalogError::Order(OrderError::CapacityExceeded { .. })) => rejected += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let ordered: u32 = bakery.stores.orders.snapshot().iter().map(|l| l.quantity).sum();
    assert!(ordered <= 10, "overcommitted: {ordered}");
    assert!(rejected > 0);
    let available = bakery.available(&day.share_token).await;
    assert!(available[0] >= 0);
}

#[tokio::test]
async fn test_health_reports_unavailable_store() {
    let bakery = start(OrderPolicy::strict());
    let rye = bakery.bread("Rye").await;
    let day = bakery.day("Monday", vec![BreadOption::new(rye.clone(), 10)]).await;

    let health = bakery.system.health().await;
    assert_eq!(health.status, HealthStatus::Healthy);
    assert_eq!(health.timestamp, wednesday_morning());

    bakery.stores.orders.set_available(false);

    let health = bakery.system.health().await;
    assert_eq!(health.status, HealthStatus::Unhealthy);
    assert!(health.error.unwrap().contains("orders"));

    let result = bakery.order(&day.share_token, "Nia", &[(&rye, 1)]).await;
    assert!(result.unwrap_err().is_storage_unavailable());

    bakery.stores.orders.set_available(true);
    assert!(bakery.system.health().await.is_healthy());
}

#[tokio::test]
async fn test_operator_login() {
    let bakery = start(OrderPolicy::strict());
    assert_eq!(
        bakery.system.login("wrong").unwrap_err(),
        AuthError::InvalidPassword
    );

    let system = BakerySystem::with_stores(
        &BakeryConfig::for_test(""),
        MemoryStores::new().stores(),
        bakery.clock.clone(),
    );
    assert_eq!(system.login("").unwrap_err(), AuthError::Disabled);
}

#[tokio::test]
async fn test_bread_types_are_unique_and_deletion_leaves_unknown_labels() {
    let bakery = start(OrderPolicy::strict());
    let rye = bakery.bread("Rye").await;

    assert_eq!(
        bakery.system.catalog.create_bread_type(&bakery.session, "Rye").await,
        Err(CatalogError::BreadType(BreadTypeError::DuplicateName("Rye".into())))
    );
    assert!(matches!(
        bakery.system.catalog.create_bread_type(&bakery.session, "  ").await,
        Err(CatalogError::BreadType(BreadTypeError::ValidationError(_)))
    ));

    let day = bakery.day("Monday", vec![BreadOption::new(rye.clone(), 4)]).await;
    bakery.order(&day.share_token, "Ola", &[(&rye, 1)]).await.unwrap();

    bakery
        .system
        .catalog
        .delete_bread_type(&bakery.session, rye.clone())
        .await
        .unwrap();
    assert!(bakery
        .system
        .catalog
        .list_bread_types(&bakery.session)
        .await
        .unwrap()
        .is_empty());

    // Menus and orders keep the dangling id
    let page = bakery.system.catalog.order_page(&day.share_token).await.unwrap();
    assert_eq!(page.options[0].bread_name, UNKNOWN_BREAD);
    assert_eq!(page.options[0].availability.available, 3);

    let report = bakery
        .system
        .catalog
        .day_report(&bakery.session, day.id.clone())
        .await
        .unwrap();
    assert_eq!(report.lines[0].bread_name, UNKNOWN_BREAD);
}

#[tokio::test]
async fn test_upcoming_baking_days_and_weekday_validation() {
    let bakery = start(OrderPolicy::strict());
    let rye = bakery.bread("Rye").await;

    // Today is Wednesday: "Wednesday" rolls a full week forward
    let next_week = bakery.day("Wednesday", vec![BreadOption::new(rye.clone(), 2)]).await;
    let friday = bakery.day("friday", vec![BreadOption::new(rye.clone(), 2)]).await;
    assert_eq!(next_week.date, NaiveDate::from_ymd_opt(2024, 3, 13).unwrap());
    assert_eq!(friday.date, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
    assert_ne!(next_week.share_token, friday.share_token);

    let upcoming = bakery
        .system
        .catalog
        .upcoming_baking_days(&bakery.session)
        .await
        .unwrap();
    let dates: Vec<_> = upcoming.iter().map(|d| d.baking_day.date).collect();
    assert_eq!(dates, vec![friday.date, next_week.date]);
    assert_eq!(upcoming[0].options[0].bread_name, "Rye");

    // Once Friday has passed it drops off the list
    bakery.clock.advance(TimeDelta::days(3));
    let upcoming = bakery
        .system
        .catalog
        .upcoming_baking_days(&bakery.session)
        .await
        .unwrap();
    assert_eq!(upcoming.len(), 1);

    assert!(matches!(
        bakery
            .system
            .catalog
            .create_baking_day(&bakery.session, "Caturday", vec![BreadOption::new(rye.clone(), 1)])
            .await,
        Err(CatalogError::BakingDay(BakingDayError::ValidationError(_)))
    ));
    assert!(matches!(
        bakery
            .system
            .catalog
            .create_baking_day(&bakery.session, "Monday", vec![])
            .await,
        Err(CatalogError::BakingDay(BakingDayError::ValidationError(_)))
    ));
}
