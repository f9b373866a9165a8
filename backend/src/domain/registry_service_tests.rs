//! Tests for the user registry service.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    LoginEventPersistenceError, MockLoginEventRepository, MockUserRepository,
};
use crate::domain::{ErrorCode, ProfileFields};

struct FixtureClock(DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 18, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn service(
    users: MockUserRepository,
    login_events: MockLoginEventRepository,
) -> UserRegistryService<MockUserRepository, MockLoginEventRepository> {
    UserRegistryService::new(
        Arc::new(users),
        Arc::new(login_events),
        Arc::new(FixtureClock(fixture_timestamp())),
    )
}

#[fixture]
fn ana_fields() -> ProfileFields {
    ProfileFields {
        given_names: "Ana".to_owned(),
        national_id: "001".to_owned(),
        ..ProfileFields::default()
    }
}

#[fixture]
fn ana_record(ana_fields: ProfileFields) -> UserRecord {
    UserRecord::new(
        UserProfile::try_from_fields(ana_fields).expect("valid profile"),
        PasswordHash::hash("secret").expect("hash"),
    )
}

fn ana_id() -> NationalId {
    NationalId::new("001").expect("valid id")
}

fn credentials(password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts("001", password).expect("valid credentials")
}

#[rstest]
#[tokio::test]
async fn register_stores_hashed_password(ana_fields: ProfileFields) {
    let stored = Arc::new(Mutex::new(None::<UserRecord>));
    let sink = Arc::clone(&stored);

    let mut users = MockUserRepository::new();
    users.expect_insert().times(1).returning(move |record| {
        *sink.lock().expect("sink lock") = Some(record.clone());
        Ok(())
    });

    let user = NewUser::try_new(ana_fields, "secret").expect("valid user");
    service(users, MockLoginEventRepository::new())
        .register(user)
        .await
        .expect("registration succeeds");

    let record = stored.lock().expect("sink lock").clone().expect("record stored");
    assert_eq!(record.profile().national_id().as_ref(), "001");
    let hash = record.password_hash().expect("hash stored");
    assert_ne!(hash.as_phc(), "secret");
    assert!(hash.verify("secret").expect("verify"));
}

#[rstest]
#[tokio::test]
async fn register_maps_duplicate_to_conflict(ana_fields: ProfileFields) {
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .times(1)
        .returning(|_| Err(UserPersistenceError::duplicate("001")));

    let user = NewUser::try_new(ana_fields, "secret").expect("valid user");
    let err = service(users, MockLoginEventRepository::new())
        .register(user)
        .await
        .expect_err("duplicate must fail");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), DUPLICATE_NATIONAL_ID);
}

#[rstest]
#[case(UserPersistenceError::connection("no servers available"))]
#[case(UserPersistenceError::query("write concern timeout"))]
#[tokio::test]
async fn register_hides_store_failures(
    ana_fields: ProfileFields,
    #[case] failure: UserPersistenceError,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .times(1)
        .return_once(move |_| Err(failure));

    let user = NewUser::try_new(ana_fields, "secret").expect("valid user");
    let err = service(users, MockLoginEventRepository::new())
        .register(user)
        .await
        .expect_err("store failure must fail");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), REGISTRATION_FAILED);
}

#[rstest]
#[tokio::test]
async fn authenticate_records_one_login_event(ana_record: UserRecord) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_national_id()
        .withf(|id| id.as_ref() == "001")
        .times(1)
        .return_once(move |_| Ok(Some(ana_record)));

    let mut login_events = MockLoginEventRepository::new();
    login_events
        .expect_append()
        .withf(|event| {
            event.national_id().as_ref() == "001"
                && event.action().as_str() == "login"
                && event.occurred_at() == fixture_timestamp()
        })
        .times(1)
        .returning(|_| Ok(()));

    let profile = service(users, login_events)
        .authenticate(&credentials("secret"))
        .await
        .expect("valid credentials authenticate");

    assert_eq!(profile.national_id().as_ref(), "001");
    assert_eq!(profile.given_names(), "Ana");
}

#[rstest]
#[tokio::test]
async fn authenticate_rejects_wrong_password_without_event(ana_record: UserRecord) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_national_id()
        .times(1)
        .return_once(move |_| Ok(Some(ana_record)));
    let mut login_events = MockLoginEventRepository::new();
    login_events.expect_append().times(0);

    let err = service(users, login_events)
        .authenticate(&credentials("wrong"))
        .await
        .expect_err("wrong password must fail");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), INVALID_CREDENTIALS);
}

#[rstest]
#[tokio::test]
async fn authenticate_rejects_unknown_user_with_same_message() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_national_id()
        .times(1)
        .returning(|_| Ok(None));
    let mut login_events = MockLoginEventRepository::new();
    login_events.expect_append().times(0);

    let err = service(users, login_events)
        .authenticate(&credentials("secret"))
        .await
        .expect_err("unknown user must fail");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), INVALID_CREDENTIALS);
}

#[rstest]
#[tokio::test]
async fn authenticate_rejects_record_without_password_hash(ana_fields: ProfileFields) {
    let legacy = UserRecord::without_password(
        UserProfile::try_from_fields(ana_fields).expect("valid profile"),
    );
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_national_id()
        .times(1)
        .return_once(move |_| Ok(Some(legacy)));
    let mut login_events = MockLoginEventRepository::new();
    login_events.expect_append().times(0);

    let err = service(users, login_events)
        .authenticate(&credentials("secret"))
        .await
        .expect_err("record without hash must not authenticate");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), INVALID_CREDENTIALS);
}

async fn time_rejections<U, E>(service: &UserRegistryService<U, E>, rounds: u32) -> Duration
where
    U: UserRepository,
    E: LoginEventRepository,
{
    let started = Instant::now();
    for _ in 0..rounds {
        let err = service
            .authenticate(&credentials("wrong"))
            .await
            .expect_err("login must be rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
    started.elapsed()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_user_rejection_costs_a_password_verification(ana_record: UserRecord) {
    const ROUNDS: u32 = 3;

    let mut known_users = MockUserRepository::new();
    known_users
        .expect_find_by_national_id()
        .returning(move |_| Ok(Some(ana_record.clone())));
    let mut unknown_users = MockUserRepository::new();
    unknown_users
        .expect_find_by_national_id()
        .returning(|_| Ok(None));
    let mut no_events = MockLoginEventRepository::new();
    no_events.expect_append().times(0);

    let known = service(known_users, MockLoginEventRepository::new());
    let unknown = service(unknown_users, no_events);

    // First call builds the fallback hash; keep it out of the measurement.
    time_rejections(&unknown, 1).await;

    let wrong_password = time_rejections(&known, ROUNDS).await;
    let unknown_user = time_rejections(&unknown, ROUNDS).await;

    assert!(
        unknown_user * 4 >= wrong_password,
        "unknown user took {unknown_user:?}, wrong password took {wrong_password:?}"
    );
}

#[rstest]
#[tokio::test]
async fn authenticate_succeeds_when_event_append_fails(ana_record: UserRecord) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_national_id()
        .times(1)
        .return_once(move |_| Ok(Some(ana_record)));
    let mut login_events = MockLoginEventRepository::new();
    login_events
        .expect_append()
        .times(1)
        .returning(|_| Err(LoginEventPersistenceError::query("logs unavailable")));

    let profile = service(users, login_events)
        .authenticate(&credentials("secret"))
        .await
        .expect("append failure must not block login");

    assert_eq!(profile.national_id().as_ref(), "001");
}

#[rstest]
#[tokio::test]
async fn authenticate_maps_store_failure_to_internal() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_national_id()
        .times(1)
        .returning(|_| Err(UserPersistenceError::connection("server selection timeout")));

    let err = service(users, MockLoginEventRepository::new())
        .authenticate(&credentials("secret"))
        .await
        .expect_err("store failure must fail");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), LOGIN_FAILED);
}

#[rstest]
#[tokio::test]
async fn find_user_returns_profile(ana_record: UserRecord) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_national_id()
        .times(1)
        .return_once(move |_| Ok(Some(ana_record)));

    let profile = service(users, MockLoginEventRepository::new())
        .find_user(&ana_id())
        .await
        .expect("user exists");

    assert_eq!(profile.national_id(), &ana_id());
}

#[rstest]
#[tokio::test]
async fn find_user_reports_missing_user() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_national_id()
        .times(1)
        .returning(|_| Ok(None));

    let err = service(users, MockLoginEventRepository::new())
        .find_user(&ana_id())
        .await
        .expect_err("missing user");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), USER_NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn find_user_maps_corrupt_record_to_internal() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_national_id()
        .times(1)
        .returning(|_| Err(UserPersistenceError::corrupt("contrasena_hash missing")));

    let err = service(users, MockLoginEventRepository::new())
        .find_user(&ana_id())
        .await
        .expect_err("corrupt record");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), LOOKUP_FAILED);
}
