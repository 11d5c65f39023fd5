//! [`ActorEntity`] implementation for [`BakingDay`].
//!
//! Every baking day gets a fresh share token at creation, re-rolled on the
//! (practically impossible) event of a collision so tokens stay globally unique.

use super::{BakingDayAction, BakingDayActionResult, BakingDayError};
use crate::model::{BakingDay, BakingDayCreate, BakingDayId, BreadOption, ShareToken};
use async_trait::async_trait;
use collection_actor::{ActorEntity, Records};
use tracing::warn;

#[async_trait]
impl ActorEntity for BakingDay {
    type Id = BakingDayId;
    type Create = BakingDayCreate;
    type Action = BakingDayAction;
    type ActionResult = BakingDayActionResult;
    type Context = ();
    type Error = BakingDayError;

    fn id(&self) -> &BakingDayId {
        &self.id
    }

    fn from_create_params(id: BakingDayId, params: BakingDayCreate) -> Result<Self, Self::Error> {
        validate_options(&params.options)?;
        Ok(Self {
            id,
            date: params.date,
            share_token: ShareToken::generate(),
            options: params.options,
        })
    }

    async fn on_create(&mut self, existing: &[Self], _ctx: &()) -> Result<(), Self::Error> {
        while existing
            .iter()
            .any(|day| day.share_token == self.share_token)
        {
            warn!(baking_day_id = %self.id, "Share token collision, regenerating");
            self.share_token = ShareToken::generate();
        }
        Ok(())
    }

    async fn handle_action(
        action: BakingDayAction,
        records: &mut Records<Self>,
        _ctx: &(),
    ) -> Result<BakingDayActionResult, Self::Error> {
        match action {
            BakingDayAction::ResolveShareToken(token) => Ok(BakingDayActionResult::Resolved(
                records.iter().find(|day| day.share_token == token).cloned(),
            )),
            BakingDayAction::Upcoming { from } => {
                let mut days: Vec<_> = records
                    .iter()
                    .filter(|day| day.date >= from)
                    .cloned()
                    .collect();
                days.sort_by_key(|day| day.date);
                Ok(BakingDayActionResult::Upcoming(days))
            }
        }
    }
}

/// A menu needs at least one option, each with a positive cap and a bread type
/// of its own. Referenced bread types are not checked for existence.
fn validate_options(options: &[BreadOption]) -> Result<(), BakingDayError> {
    if options.is_empty() {
        return Err(BakingDayError::ValidationError(
            "A baking day needs at least one bread option".into(),
        ));
    }
    for (i, option) in options.iter().enumerate() {
        if option.max_quantity == 0 {
            return Err(BakingDayError::ValidationError(format!(
                "Maximum quantity for {} must be positive",
                option.bread_type_id
            )));
        }
        if options[..i]
            .iter()
            .any(|other| other.bread_type_id == option.bread_type_id)
        {
            return Err(BakingDayError::ValidationError(format!(
                "Bread type {} is offered twice",
                option.bread_type_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn create(options: Vec<BreadOption>) -> Result<BakingDay, BakingDayError> {
        BakingDay::from_create_params("day".into(), BakingDayCreate { date: date(11), options })
    }

    fn day(id: &str, d: u32, token: &str) -> BakingDay {
        BakingDay {
            id: id.into(),
            date: date(d),
            share_token: token.into(),
            options: vec![BreadOption::new("rye", 3)],
        }
    }

    #[test]
    fn option_list_is_validated() {
        assert!(create(vec![BreadOption::new("rye", 3)]).is_ok());
        assert!(matches!(create(vec![]), Err(BakingDayError::ValidationError(_))));
        assert!(matches!(
            create(vec![BreadOption::new("rye", 0)]),
            Err(BakingDayError::ValidationError(_))
        ));
        assert!(matches!(
            create(vec![BreadOption::new("rye", 1), BreadOption::new("rye", 2)]),
            Err(BakingDayError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn colliding_share_token_is_regenerated() {
        let existing = vec![day("d1", 11, "taken")];
        let mut fresh = day("d2", 12, "taken");

        fresh.on_create(&existing, &()).await.unwrap();

        assert_ne!(fresh.share_token, ShareToken::from("taken"));
    }

    #[tokio::test]
    async fn upcoming_filters_and_sorts_by_date() {
        let mut records = Records::new(vec![
            day("late", 20, "a"),
            day("past", 1, "b"),
            day("today", 10, "c"),
        ]);

        let result = BakingDay::handle_action(
            BakingDayAction::Upcoming { from: date(10) },
            &mut records,
            &(),
        )
        .await
        .unwrap();

        let BakingDayActionResult::Upcoming(days) = result else {
            panic!("unexpected result");
        };
        let ids: Vec<_> = days.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["today", "late"]);
        assert!(!records.is_dirty());
    }

    #[tokio::test]
    async fn resolve_share_token() {
        let mut records = Records::new(vec![day("d1", 11, "tok-1")]);

        let found = BakingDay::handle_action(
            BakingDayAction::ResolveShareToken("tok-1".into()),
            &mut records,
            &(),
        )
        .await
        .unwrap();
        assert!(matches!(found, BakingDayActionResult::Resolved(Some(d)) if d.id.as_str() == "d1"));

        let missing = BakingDay::handle_action(
            BakingDayAction::ResolveShareToken("nope".into()),
            &mut records,
            &(),
        )
        .await
        .unwrap();
        assert!(matches!(missing, BakingDayActionResult::Resolved(None)));
    }
}
