use super::*;
use crate::config::ClientConfig;
use crate::error::AdminErrorStatus;
use crate::message::mock::RecordingNotifier;
use crate::request::mock::MockHttpClient;
use serde_json::json;
use std::cell::Cell;

// =========================================================
// Shared Mock Components
// =========================================================

#[derive(Default)]
struct TestTable {
    selected: RefCell<Vec<i64>>,
    log: RefCell<Vec<String>>,
}

impl TableSelection for TestTable {
    fn selected_ids(&self) -> Vec<i64> {
        self.log.borrow_mut().push("selected_ids".to_string());
        self.selected.borrow().clone()
    }

    fn clear_selection(&self) {
        self.log.borrow_mut().push("clear_selection".to_string());
        self.selected.borrow_mut().clear();
    }

    fn set_adaptive(&self) {
        self.log.borrow_mut().push("set_adaptive".to_string());
    }
}

struct Harness {
    http: MockHttpClient,
    notifier: RecordingNotifier,
    table: Rc<TestTable>,
    view: OperLogView<MockHttpClient>,
}

fn setup() -> Harness {
    let http = MockHttpClient::new();
    let notifier = RecordingNotifier::default();
    let table = Rc::new(TestTable::default());
    let api = AdminApi::new(http.clone(), ClientConfig::default());
    let view = OperLogView::new(api, Rc::new(notifier.clone()), table.clone());
    Harness {
        http,
        notifier,
        table,
        view,
    }
}

fn one_row() -> serde_json::Value {
    json!({
        "code": 200,
        "rows": [{
            "operId": 1,
            "title": "字典类型",
            "businessType": 2,
            "operName": "admin",
            "operIp": "127.0.0.1",
            "status": 1,
            "operTime": "2024-05-01 10:00:00",
            "costTime": 8
        }],
        "total": 1
    })
}

fn empty_page() -> serde_json::Value {
    json!({"code": 200, "rows": [], "total": 0})
}

// =========================================================
// Query lifecycle
// =========================================================

#[test]
fn initial_state() {
    let h = setup();
    let state = h.view.state();
    assert!(state.loading);
    assert!(state.data_list.is_empty());
    assert_eq!(state.selected_num, 0);
    assert_eq!(state.pagination, Pagination::new(10));
    assert_eq!(state.form, OperLogQuery::default());
}

#[tokio::test]
async fn search_fills_rows_and_total() {
    let h = setup();
    h.http.respond_json(one_row());

    h.view.on_mount().await.unwrap();

    let state = h.view.state();
    assert_eq!(state.data_list.len(), 1);
    assert_eq!(state.data_list[0].oper_id, 1);
    assert_eq!(state.pagination.total, 1);
    assert!(!state.loading);
    assert_eq!(h.http.request_count(), 1);
}

#[tokio::test]
async fn search_sends_form_snapshot() {
    let h = setup();
    h.http.respond_json(empty_page());
    h.view.update_form(|f| {
        f.oper_name = "admin".into();
        f.status = "0".into();
    });

    h.view.on_search().await.unwrap();

    assert_eq!(
        h.http.last_request().unwrap().url,
        "/dev-api/monitor/operlog/list?operName=admin&status=0"
    );
}

#[tokio::test]
async fn loading_is_true_while_request_is_in_flight() {
    let h = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    h.view.subscribe(move |s| sink.borrow_mut().push(s.loading));
    h.http.respond_json(one_row());

    h.view.on_search().await.unwrap();

    assert_eq!(*seen.borrow(), vec![true, false]);
}

#[tokio::test]
async fn transport_error_clears_loading_and_propagates() {
    let h = setup();
    h.http.fail("timeout");

    let err = h.view.on_search().await.unwrap_err();

    assert_eq!(err.status, AdminErrorStatus::Transport);
    assert!(!h.view.state().loading);
}

#[tokio::test]
async fn application_failure_keeps_rows_and_notifies() {
    let h = setup();
    h.http.respond_json(one_row());
    h.http.respond_json(json!({"code": 403, "msg": "没有权限，请联系管理员授权"}));

    h.view.on_search().await.unwrap();
    h.view.on_search().await.unwrap();

    let state = h.view.state();
    assert_eq!(state.data_list.len(), 1);
    assert!(!state.loading);
    assert_eq!(
        *h.notifier.messages.borrow(),
        vec![("没有权限，请联系管理员授权".to_string(), MessageKind::Error)]
    );
}

#[tokio::test]
async fn overlapping_searches_keep_the_last_response() {
    let h = setup();
    let first = h.http.respond_gated(one_row());
    let second = h.http.respond_gated(empty_page());

    let release = async {
        second.send(()).unwrap();
        tokio::task::yield_now().await;
        first.send(()).unwrap();
    };
    let (a, b, ()) = futures::join!(h.view.on_search(), h.view.on_search(), release);
    a.unwrap();
    b.unwrap();

    let state = h.view.state();
    assert_eq!(h.http.request_count(), 2);
    assert_eq!(state.data_list.len(), 1);
    assert_eq!(state.pagination.total, 1);
    assert!(!state.loading);
}

#[tokio::test]
async fn reset_form_restores_defaults_and_queries_once() {
    let h = setup();
    h.view.update_form(|f| {
        f.oper_ip = "10.0.0.1".into();
        f.title = "用户管理".into();
        f.oper_name = "ry".into();
        f.business_type = "1".into();
        f.status = "1".into();
        f.date_range = vec!["2024-01-01".into(), "2024-01-02".into()];
    });
    h.http.respond_json(empty_page());

    h.view.reset_form().await.unwrap();

    assert_eq!(h.view.state().form, OperLogQuery::default());
    assert_eq!(h.http.request_count(), 1);
    assert_eq!(
        h.http.last_request().unwrap().url,
        "/dev-api/monitor/operlog/list"
    );
}

// =========================================================
// Selection & batch actions
// =========================================================

#[test]
fn selection_change_tracks_count() {
    let h = setup();
    h.view.handle_selection_change(3);
    assert_eq!(h.view.state().selected_num, 3);
    assert_eq!(*h.table.log.borrow(), vec!["set_adaptive"]);
}

#[test]
fn selection_cancel_is_idempotent() {
    let h = setup();
    h.view.on_selection_cancel();
    h.view.on_selection_cancel();
    assert_eq!(h.view.state().selected_num, 0);
    assert_eq!(
        *h.table.log.borrow(),
        vec!["clear_selection", "clear_selection"]
    );
}

#[tokio::test]
async fn batch_delete_notifies_ids_and_requeries() {
    let h = setup();
    *h.table.selected.borrow_mut() = vec![3, 5];
    h.view.handle_selection_change(2);
    h.http.respond_json(empty_page());

    h.view.on_batch_del().await.unwrap();

    assert_eq!(
        *h.notifier.messages.borrow(),
        vec![("已删除序号为 3,5 的数据".to_string(), MessageKind::Success)]
    );
    assert_eq!(h.view.state().selected_num, 0);
    assert!(h.table.selected.borrow().is_empty());
    // 只重新查询列表，不调用任何删除接口
    assert_eq!(h.http.request_count(), 1);
    assert_eq!(
        h.http.last_request().unwrap().method,
        crate::request::HttpMethod::Get
    );
}

#[tokio::test]
async fn clear_all_notifies_and_requeries() {
    let h = setup();
    h.http.respond_json(empty_page());

    h.view.clear_all().await.unwrap();

    assert_eq!(
        *h.notifier.messages.borrow(),
        vec![("已删除所有日志数据".to_string(), MessageKind::Success)]
    );
    assert_eq!(h.http.request_count(), 1);
}

#[test]
fn pagination_changes_are_not_wired_into_state() {
    let h = setup();
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    h.view.subscribe(move |_| counter.set(counter.get() + 1));
    h.view.handle_size_change(20);
    h.view.handle_current_change(3);
    assert_eq!(calls.get(), 0);
    assert_eq!(h.view.state().pagination, Pagination::new(10));
}

// =========================================================
// Column rendering
// =========================================================

#[test]
fn columns_render_presentation_values() {
    let row = OperLog {
        oper_id: 42,
        title: "操作日志".into(),
        business_type: 9,
        oper_name: "admin".into(),
        oper_ip: "127.0.0.1".into(),
        status: 0,
        oper_time: Some("2024-05-01T10:00:00".into()),
        cost_time: 15,
        ..Default::default()
    };
    let rendered: Vec<String> = COLUMNS.iter().map(|c| c.render(&row)).collect();
    assert_eq!(
        rendered,
        vec![
            "",
            "42",
            "操作日志",
            "9",
            "admin",
            "127.0.0.1",
            "失败",
            "2024-05-01 10:00:00",
            "15ms"
        ]
    );
}

#[test]
fn status_one_is_success() {
    assert_eq!(status_label(1), "成功");
    assert_eq!(TagTone::of(1), TagTone::Success);
    assert_eq!(status_label(0), "失败");
    assert_eq!(TagTone::of(2), TagTone::Danger);
}
