//! # Test Fixtures
//!
//! A [`ServiceContainer`] on a [`ManualClock`] with a small directory:
//!
//! | Person    | Login        | Role        |
//! |-----------|--------------|-------------|
//! | requester | `staff`      | user        |
//! | handler   | `handler`    | user        |
//! | floater   | (none)       |             |
//! |           | `admins[0]`  | admin       |
//! |           | `admins[1]`  | admin       |
//! |           | `admins[2]`  | super admin |

use std::sync::Arc;

use case_runtime::container::Workers;
use case_runtime::{RuntimeConfig, ServiceContainer};
use chrono::{Duration, TimeZone, Utc};
use cw_01_case_lifecycle::{Case, CaseLifecycleApi, KindRefs, NewCase};
use shared_bus::{EventFilter, EventTopic, Subscription};
use shared_types::{
    CaseKind, Clock, CurrentUser, InMemoryDirectory, ManualClock, Person, PersonId, RefId, Role,
    Timestamp, User, UserId,
};

/// Fixed starting instant for every world.
pub fn epoch() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap()
}

pub struct World {
    pub clock: Arc<ManualClock>,
    pub container: ServiceContainer,
    /// Kept so the dispatcher subscription stays registered.
    pub workers: Workers,
    pub staff: UserId,
    pub requester: PersonId,
    pub handler: PersonId,
    pub handler_user: UserId,
    /// Handler person without a login.
    pub floater: PersonId,
    pub admins: [UserId; 3],
}

impl World {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new(epoch()));
        let staff = UserId::new();
        let handler_user = UserId::new();
        let admins = [UserId::new(), UserId::new(), UserId::new()];
        let (requester, handler, floater) = (PersonId::new(), PersonId::new(), PersonId::new());

        let mut directory = InMemoryDirectory::new()
            .with_person(Person {
                id: requester,
                full_name: "Nguyen Van A".to_string(),
                linked_user: Some(staff),
            })
            .with_person(Person {
                id: handler,
                full_name: "Tran Thi B".to_string(),
                linked_user: Some(handler_user),
            })
            .with_person(Person {
                id: floater,
                full_name: "Le Van C".to_string(),
                linked_user: None,
            })
            .with_user(User {
                id: staff,
                display_name: "staff".to_string(),
                role: Role::User,
            })
            .with_user(User {
                id: handler_user,
                display_name: "handler".to_string(),
                role: Role::User,
            });
        for (i, admin) in admins.iter().enumerate() {
            directory = directory.with_user(User {
                id: *admin,
                display_name: format!("admin-{i}"),
                role: if i == 2 { Role::SuperAdmin } else { Role::Admin },
            });
        }

        let (container, workers) =
            ServiceContainer::with_clock(&RuntimeConfig::default(), directory, clock.clone())
                .unwrap();

        Self {
            clock,
            container,
            workers,
            staff,
            requester,
            handler,
            handler_user,
            floater,
            admins,
        }
    }

    pub fn staff_actor(&self) -> CurrentUser {
        CurrentUser {
            id: self.staff,
            role: Role::User,
        }
    }

    pub fn admin_actor(&self) -> CurrentUser {
        CurrentUser {
            id: self.admins[0],
            role: Role::Admin,
        }
    }

    /// A lifecycle subscription opened before the calls that should reach it.
    pub fn subscribe(&self) -> Subscription {
        self.container
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Lifecycle]))
    }

    /// Create a case started `age` before the current clock.
    pub async fn open_case(&self, kind: CaseKind, handler: PersonId, age: Duration) -> Case {
        self.container
            .cases
            .create_case(self.staff_actor(), kind, new_case(kind, handler, self.clock_now() - age))
            .await
            .unwrap_or_else(|e| panic!("create {kind} case: {e}"))
    }

    pub fn clock_now(&self) -> Timestamp {
        self.clock.now()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Input that satisfies every per-kind requirement.
pub fn new_case(kind: CaseKind, handler: PersonId, start_date: Timestamp) -> NewCase {
    let refs = match kind {
        CaseKind::Deployment => KindRefs {
            deployment_type_id: Some(RefId::new()),
            ..KindRefs::default()
        },
        CaseKind::Maintenance => KindRefs {
            maintenance_type_id: Some(RefId::new()),
            ..KindRefs::default()
        },
        CaseKind::Warranty => KindRefs {
            warranty_type_id: Some(RefId::new()),
            ..KindRefs::default()
        },
        _ => KindRefs::default(),
    };
    NewCase {
        title: format!("{kind} request"),
        description: "Printer on floor 2 jams on every job".to_string(),
        handler_id: Some(handler),
        counterparty_name: Some("Phong Ke Toan".to_string()),
        start_date: Some(start_date),
        refs,
        ..NewCase::default()
    }
}
