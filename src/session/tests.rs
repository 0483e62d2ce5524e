use super::*;
use crate::config::ClientConfig;
use crate::error::AdminErrorStatus;
use crate::navigation::mock::RecordingNavigator;
use crate::navigation::{HOME_PATH, TagEntry};
use crate::request::mock::MockHttpClient;
use crate::storage::MemoryStore;
use pureadmin_shared::TOKEN_TTL_MS;
use serde_json::json;

// =========================================================
// Shared Mock Components
// =========================================================

struct Harness {
    http: MockHttpClient,
    tokens: TokenStorage,
    navigator: RecordingNavigator,
    store: SessionStore<MockHttpClient>,
}

fn setup_with(record: Option<TokenRecord>) -> Harness {
    let http = MockHttpClient::new();
    let tokens = TokenStorage::new(Rc::new(MemoryStore::new()), "user-info");
    if let Some(record) = record {
        tokens.save(&record).unwrap();
    }
    let navigator = RecordingNavigator::default();
    let api = AdminApi::new(http.clone(), ClientConfig::default()).with_tokens(tokens.clone());
    let store = SessionStore::new(api, tokens.clone(), Rc::new(navigator.clone()));
    Harness {
        http,
        tokens,
        navigator,
        store,
    }
}

fn setup() -> Harness {
    setup_with(None)
}

fn credentials() -> LoginRequest {
    LoginRequest {
        username: "admin".into(),
        password: "admin123".into(),
        ..Default::default()
    }
}

fn profile_json() -> serde_json::Value {
    json!({
        "code": 200,
        "msg": "操作成功",
        "user": {"avatar": "a", "userName": "u", "nickName": "n"},
        "roles": ["r1"],
        "permissions": ["p1"]
    })
}

fn authenticated_record() -> TokenRecord {
    TokenRecord {
        access_token: "tok".into(),
        expires: Timestamp::now() + Duration::from_secs(600),
        avatar: "a".into(),
        user_name: "u".into(),
        nick_name: "n".into(),
        roles: vec!["admin".into()],
        permissions: vec!["*:*:*".into()],
    }
}

// =========================================================
// Initialization
// =========================================================

#[test]
fn fresh_store_is_anonymous_with_defaults() {
    let h = setup();
    let state = h.store.state();
    assert_eq!(state.user_name, "");
    assert!(state.roles.is_empty());
    assert!(state.permissions.is_empty());
    assert!(!state.is_remembered);
    assert_eq!(state.login_day, 7);
    assert_eq!(h.store.phase(), SessionPhase::Anonymous);
}

#[test]
fn store_restores_from_persisted_record() {
    let h = setup_with(Some(authenticated_record()));
    let state = h.store.state();
    assert_eq!(state.user_name, "u");
    assert_eq!(state.roles, vec!["admin".to_string()]);
    assert_eq!(h.store.phase(), SessionPhase::Authenticated);
}

#[test]
fn expired_token_makes_session_anonymous() {
    let mut record = authenticated_record();
    record.expires = Timestamp::new(1);
    let h = setup_with(Some(record));
    assert_eq!(h.store.state().user_name, "u");
    assert_eq!(h.store.phase(), SessionPhase::Anonymous);
}

#[test]
fn drop_expired_clears_stale_record() {
    let mut record = authenticated_record();
    record.expires = Timestamp::new(1);
    let h = setup_with(Some(record));

    assert!(h.store.drop_expired());
    assert!(h.tokens.load().is_none());
    assert!(h.store.state().user_name.is_empty());
    assert_eq!(h.store.state().avatar, "a");
}

#[tokio::test]
async fn token_expiring_while_running_is_caught_by_validate() {
    let mut record = authenticated_record();
    record.expires = Timestamp::now() + Duration::from_millis(50);
    let h = setup_with(Some(record));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    h.store.subscribe(move |s| sink.borrow_mut().push(s.user_name.clone()));
    assert_eq!(h.store.validate(), SessionPhase::Authenticated);

    tokio::time::sleep(Duration::from_millis(80)).await;

    assert_eq!(h.store.validate(), SessionPhase::Anonymous);
    assert!(h.store.state().user_name.is_empty());
    assert!(h.tokens.load().is_none());
    assert_eq!(*seen.borrow(), vec![String::new()]);
}

#[test]
fn drop_expired_keeps_valid_record() {
    let h = setup_with(Some(authenticated_record()));
    assert!(!h.store.drop_expired());
    assert!(h.tokens.load().is_some());
    assert_eq!(h.store.state().user_name, "u");
}

// =========================================================
// Setters & dispatch
// =========================================================

#[test]
fn setters_notify_subscribers() {
    let h = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    h.store
        .subscribe(move |state| sink.borrow_mut().push(state.login_day));

    h.store.set_login_day(30);
    h.store.set_is_remembered(true);

    assert_eq!(*seen.borrow(), vec![30, 30]);
    assert!(h.store.state().is_remembered);
}

#[test]
fn clear_keeps_avatar_and_login_options() {
    let mut state = SessionState::from_record(Some(&authenticated_record()), 7);
    state.reduce(SessionAction::SetIsRemembered(true));
    state.reduce(SessionAction::Clear);
    assert_eq!(state.user_name, "");
    assert!(state.roles.is_empty());
    assert!(state.permissions.is_empty());
    assert_eq!(state.avatar, "a");
    assert_eq!(state.nick_name, "n");
    assert!(state.is_remembered);
    assert_eq!(state.login_day, 7);
}

#[test]
fn wildcard_permission_grants_everything() {
    let state = SessionState::from_record(Some(&authenticated_record()), 7);
    assert!(state.has_permission("monitor:operlog:list"));
    let empty = SessionState::from_record(None, 7);
    assert!(!empty.has_permission("monitor:operlog:list"));
}

// =========================================================
// login
// =========================================================

#[tokio::test]
async fn login_success_persists_one_hour_token() {
    let h = setup();
    h.http
        .respond_json(json!({"code": 200, "msg": "操作成功", "token": "jwt-abc"}));

    let before = Timestamp::now();
    let res = h.store.login(&credentials()).await.unwrap();
    let after = Timestamp::now();

    assert_eq!(
        res,
        ApiResult::Success(LoginResult {
            token: "jwt-abc".into()
        })
    );
    let record = h.tokens.load().unwrap();
    assert_eq!(record.access_token, "jwt-abc");
    assert!(record.expires.as_millis() >= before.as_millis() + TOKEN_TTL_MS);
    assert!(record.expires.as_millis() <= after.as_millis() + TOKEN_TTL_MS);

    // 登录本身不修改展示状态
    assert_eq!(h.store.state().user_name, "");
}

#[tokio::test]
async fn login_failure_writes_nothing_and_returns_envelope() {
    let h = setup();
    h.http
        .respond_json(json!({"code": 500, "msg": "用户不存在/密码错误"}));

    let res = h.store.login(&credentials()).await.unwrap();

    assert_eq!(
        res,
        ApiResult::Failure {
            code: 500,
            msg: "用户不存在/密码错误".into()
        }
    );
    assert!(h.tokens.load().is_none());
}

#[tokio::test]
async fn login_transport_error_leaves_state_unchanged() {
    let h = setup_with(Some(authenticated_record()));
    h.http.fail("connection reset");

    let err = h.store.login(&credentials()).await.unwrap_err();

    assert_eq!(err.status, AdminErrorStatus::Transport);
    assert_eq!(h.tokens.load().unwrap().access_token, "tok");
    assert_eq!(h.store.state().user_name, "u");
}

// =========================================================
// fetch_profile
// =========================================================

#[tokio::test]
async fn fetch_profile_updates_state_and_merges_token() {
    let expires = Timestamp::new(9_999_999_999_999);
    let h = setup_with(Some(TokenRecord::credentials("tok", expires)));
    h.http.respond_json(profile_json());

    let res = h.store.fetch_profile().await.unwrap();
    assert!(res.is_success());

    let state = h.store.state();
    assert_eq!(state.avatar, "a");
    assert_eq!(state.user_name, "u");
    assert_eq!(state.nick_name, "n");
    assert_eq!(state.roles, vec!["r1".to_string()]);
    assert_eq!(state.permissions, vec!["p1".to_string()]);

    let record = h.tokens.load().unwrap();
    assert_eq!(record.access_token, "tok");
    assert_eq!(record.expires, expires);
    assert_eq!(record.user_name, "u");
    assert_eq!(record.roles, vec!["r1".to_string()]);
    assert_eq!(record.permissions, vec!["p1".to_string()]);
}

#[tokio::test]
async fn fetch_profile_sends_bearer_token() {
    let h = setup_with(Some(authenticated_record()));
    h.http.respond_json(profile_json());
    h.store.fetch_profile().await.unwrap();
    assert_eq!(
        h.http.last_request().unwrap().header("Authorization"),
        Some("Bearer tok")
    );
}

#[tokio::test]
async fn fetch_profile_failure_resolves_without_changes() {
    let h = setup_with(Some(authenticated_record()));
    let stored = h.tokens.load();
    h.http.respond_json(json!({"code": 401, "msg": "登录状态已过期"}));

    let res = h.store.fetch_profile().await.unwrap();

    assert_eq!(res.code(), 401);
    assert_eq!(h.store.state().user_name, "u");
    assert_eq!(h.tokens.load(), stored);
}

#[tokio::test]
async fn fetch_profile_emits_one_notification_per_field() {
    let h = setup();
    let count = Rc::new(Cell::new(0));
    let counter = count.clone();
    h.store.subscribe(move |_| counter.set(counter.get() + 1));
    h.http.respond_json(profile_json());

    h.store.fetch_profile().await.unwrap();

    assert_eq!(count.get(), 5);
}

// =========================================================
// logout
// =========================================================

#[tokio::test]
async fn logout_clears_session_and_navigates_to_login() {
    let h = setup_with(Some(authenticated_record()));
    h.http.respond_json(json!({"code": 200, "msg": "退出成功"}));

    h.store.logout().await.unwrap();

    let state = h.store.state();
    assert_eq!(state.user_name, "");
    assert!(state.roles.is_empty());
    assert!(state.permissions.is_empty());
    assert_eq!(state.avatar, "a");
    assert!(h.tokens.load().is_none());
    assert_eq!(*h.navigator.location.borrow(), LOGIN_PATH);
    assert_eq!(
        *h.navigator.tags.borrow(),
        vec![TagEntry::new(HOME_PATH, "首页")]
    );
    assert_eq!(
        *h.navigator.calls.borrow(),
        vec!["reset_tags", "reset_routes", "push:/login"]
    );
    assert_eq!(h.store.phase(), SessionPhase::Anonymous);
}

#[tokio::test]
async fn logout_endpoint_error_propagates_before_clearing() {
    let h = setup_with(Some(authenticated_record()));
    h.http.fail("offline");

    let err = h.store.logout().await.unwrap_err();

    assert_eq!(err.status, AdminErrorStatus::Transport);
    assert_eq!(h.store.state().user_name, "u");
    assert!(h.tokens.load().is_some());
    assert!(h.navigator.calls.borrow().is_empty());
}

#[tokio::test]
async fn logout_rejected_by_backend_still_clears_locally() {
    let h = setup_with(Some(authenticated_record()));
    h.http.respond_json(json!({"code": 500, "msg": "服务异常"}));

    h.store.logout().await.unwrap();

    assert_eq!(h.store.state().user_name, "");
    assert!(h.tokens.load().is_none());
    assert_eq!(*h.navigator.location.borrow(), LOGIN_PATH);
}

#[tokio::test]
async fn login_arriving_after_logout_is_discarded() {
    let h = setup();
    let gate = h
        .http
        .respond_gated(json!({"code": 200, "msg": "操作成功", "token": "late"}));
    h.http.respond_json(json!({"code": 200, "msg": "退出成功"}));

    let creds = credentials();
    let login = h.store.login(&creds);
    let logout = async {
        h.store.logout().await.unwrap();
        gate.send(()).unwrap();
    };
    let (logged_in, ()) = futures::join!(login, logout);

    let err = logged_in.unwrap_err();
    assert_eq!(err.status, AdminErrorStatus::Superseded);
    assert!(h.tokens.load().is_none());
    assert_eq!(h.store.phase(), SessionPhase::Anonymous);
}

#[tokio::test]
async fn profile_arriving_after_logout_is_discarded() {
    let h = setup_with(Some(authenticated_record()));
    let gate = h.http.respond_gated(profile_json());
    h.http.respond_json(json!({"code": 200, "msg": "退出成功"}));

    let fetch = h.store.fetch_profile();
    let logout = async {
        h.store.logout().await.unwrap();
        gate.send(()).unwrap();
    };
    let (fetched, ()) = futures::join!(fetch, logout);

    let err = fetched.unwrap_err();
    assert_eq!(err.status, AdminErrorStatus::Superseded);
    assert_eq!(h.store.state().user_name, "");
    assert!(h.tokens.load().is_none());
}
