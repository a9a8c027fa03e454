//! Event editing workflows. Events are keyed by UUID.

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ADMIN_ROLE;
use crate::domain::event::{Event, NewEvent};
use crate::domain::types::EventId;
use crate::forms::events::EventForm;
use crate::repository::{EventReader, EventWriter};
use crate::services::{ServiceError, ServiceResult};

fn payload(form: EventForm) -> ServiceResult<NewEvent> {
    NewEvent::try_from(form).map_err(|err| {
        log::error!("Failed to validate event form: {err}");
        ServiceError::Form(format!("Invalid event: {err}"))
    })
}

pub fn load_event<R>(repo: &R, user: &AuthenticatedUser, id: &str) -> ServiceResult<Event>
where
    R: EventReader + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id: EventId = id.parse()?;
    repo.get_event_by_id(id)
        .map_err(|err| {
            log::error!("Failed to load event {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

pub fn create_event<R>(repo: &R, user: &AuthenticatedUser, form: EventForm) -> ServiceResult<Event>
where
    R: EventWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new = payload(form)?;
    let created = repo.create_event(&new).map_err(|err| {
        log::error!("Failed to create event: {err}");
        err
    })?;
    log::info!("Event {} created by {}", created.id, user.email);
    Ok(created)
}

pub fn update_event<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: &str,
    form: EventForm,
) -> ServiceResult<Event>
where
    R: EventWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id: EventId = id.parse()?;
    let updates = payload(form)?;
    Ok(repo.update_event(id, &updates).map_err(|err| {
        log::error!("Failed to update event {id}: {err}");
        err
    })?)
}

pub fn delete_event<R>(repo: &R, user: &AuthenticatedUser, id: &str) -> ServiceResult<()>
where
    R: EventWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id: EventId = id.parse()?;
    repo.delete_event(id).map_err(|err| {
        log::error!("Failed to delete event {id}: {err}");
        err
    })?;
    log::info!("Event {id} deleted by {}", user.email);
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@example.com".to_string(),
            hub_id: 1,
            name: "Admin".to_string(),
            roles: vec![SERVICE_ADMIN_ROLE.to_string()],
            exp: 0,
        }
    }

    #[test]
    fn malformed_uuid_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_event_by_id().times(0);

        let result = load_event(&repo, &admin(), "42");

        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
    }

    #[test]
    fn delete_parses_uuid() {
        let id = EventId::new();
        let expected = id;
        let mut repo = MockRepository::new();
        repo.expect_delete_event()
            .withf(move |got| *got == expected)
            .times(1)
            .returning(|_| Ok(()));

        delete_event(&repo, &admin(), &id.to_string()).unwrap();
    }

    #[test]
    fn invalid_agenda_is_a_form_error() {
        let mut repo = MockRepository::new();
        repo.expect_create_event().times(0);
        let form = EventForm {
            title: "Investor day".into(),
            description: String::new(),
            location: None,
            starts_at: None,
            agenda: Some(r#"{"not": "a list"}"#.into()),
            speakers: None,
        };

        let result = create_event(&repo, &admin(), form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
