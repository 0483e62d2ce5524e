//! 操作日志视图模型
//!
//! 持有筛选表单、分页与行数据，挂载时查询一次，之后在搜索、重置与批量操作后重新查询。
//! 并发的查询不会相互取消，最后返回的结果覆盖之前的结果。

use crate::api::AdminApi;
use crate::error::AdminResult;
use crate::message::{MessageKind, Notifier};
use crate::request::HttpClient;
use log::debug;
use pureadmin_shared::date::format_datetime;
use pureadmin_shared::{ApiResult, OperLog, OperLogQuery};
use std::cell::RefCell;
use std::rc::Rc;

#[cfg(test)]
mod tests;

// =========================================================
// 表格抽象
// =========================================================

/// 表格组件提供的选择能力
pub trait TableSelection {
    /// 当前选中行的日志编号
    fn selected_ids(&self) -> Vec<i64>;
    /// 清空表格自身的选择
    fn clear_selection(&self);
    /// 选择变化后重新计算表格高度
    fn set_adaptive(&self) {}
}

/// 分页状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub total: u64,
    pub page_size: u32,
    pub current_page: u32,
    pub background: bool,
}

impl Pagination {
    pub fn new(page_size: u32) -> Self {
        Self {
            total: 0,
            page_size,
            current_page: 1,
            background: true,
        }
    }
}

/// 视图状态快照
#[derive(Debug, Clone, PartialEq)]
pub struct OperLogState {
    pub form: OperLogQuery,
    pub loading: bool,
    pub data_list: Vec<OperLog>,
    pub selected_num: usize,
    pub pagination: Pagination,
}

type Listener = Box<dyn Fn(&OperLogState)>;

// =========================================================
// 视图模型
// =========================================================

pub struct OperLogView<C> {
    api: AdminApi<C>,
    notifier: Rc<dyn Notifier>,
    table: Rc<dyn TableSelection>,
    state: RefCell<OperLogState>,
    listeners: RefCell<Vec<Listener>>,
}

impl<C: HttpClient> OperLogView<C> {
    pub fn new(api: AdminApi<C>, notifier: Rc<dyn Notifier>, table: Rc<dyn TableSelection>) -> Self {
        let pagination = Pagination::new(api.config().page_size);
        Self {
            api,
            notifier,
            table,
            state: RefCell::new(OperLogState {
                form: OperLogQuery::default(),
                loading: true,
                data_list: Vec::new(),
                selected_num: 0,
                pagination,
            }),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn state(&self) -> OperLogState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self, listener: impl Fn(&OperLogState) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    fn update<R>(&self, f: impl FnOnce(&mut OperLogState) -> R) -> R {
        let out = f(&mut self.state.borrow_mut());
        let snapshot = self.state.borrow().clone();
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }
        out
    }

    /// 修改筛选表单（供输入框绑定）
    pub fn update_form(&self, f: impl FnOnce(&mut OperLogQuery)) {
        self.update(|s| f(&mut s.form));
    }

    pub async fn on_mount(&self) -> AdminResult<()> {
        self.on_search().await
    }

    /// 以当前表单快照查询列表
    pub async fn on_search(&self) -> AdminResult<()> {
        let form = self.update(|s| {
            s.loading = true;
            s.form.clone()
        });

        let res = match self.api.list_oper_logs(&form).await {
            Ok(res) => res,
            Err(e) => {
                self.update(|s| s.loading = false);
                return Err(e.in_op("operlog.search"));
            }
        };

        match res {
            ApiResult::Success(table) => self.update(|s| {
                s.data_list = table.rows;
                s.pagination.total = table.total;
                s.loading = false;
            }),
            ApiResult::Failure { code, msg } => {
                self.update(|s| s.loading = false);
                debug!("[OperLog] list rejected with {}: {}", code, msg);
                self.notifier.message(&msg, MessageKind::Error);
            }
        }
        Ok(())
    }

    /// 表单恢复默认值并重新查询一次
    pub async fn reset_form(&self) -> AdminResult<()> {
        self.update(|s| s.form = OperLogQuery::default());
        self.on_search().await
    }

    /// 表格勾选变化
    pub fn handle_selection_change(&self, selected: usize) {
        self.update(|s| s.selected_num = selected);
        self.table.set_adaptive();
    }

    /// 取消选择
    pub fn on_selection_cancel(&self) {
        self.update(|s| s.selected_num = 0);
        self.table.clear_selection();
    }

    /// 批量删除
    ///
    /// 尚无删除接口，仅提示选中的编号后刷新列表。
    pub async fn on_batch_del(&self) -> AdminResult<()> {
        let ids = self.table.selected_ids();
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.notifier
            .message(&format!("已删除序号为 {} 的数据", joined), MessageKind::Success);
        self.update(|s| s.selected_num = 0);
        self.table.clear_selection();
        self.on_search().await
    }

    /// 清空日志
    ///
    /// 尚无清空接口，仅提示后刷新列表。
    pub async fn clear_all(&self) -> AdminResult<()> {
        self.notifier
            .message("已删除所有日志数据", MessageKind::Success);
        self.on_search().await
    }

    pub fn handle_size_change(&self, page_size: u32) {
        debug!("[OperLog] {} items per page", page_size);
    }

    pub fn handle_current_change(&self, page: u32) {
        debug!("[OperLog] current page: {}", page);
    }
}

// =========================================================
// 列定义
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// 多选列，数据刷新后保留选项
    Selection,
    Text,
    /// 状态标签：1 成功，其余失败
    Status,
    /// `YYYY-MM-DD HH:mm:ss`
    DateTime,
    /// 毫秒耗时
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub label: &'static str,
    pub prop: &'static str,
    pub min_width: u32,
    pub kind: ColumnKind,
}

pub const COLUMNS: &[ColumnDef] = &[
    ColumnDef { label: "勾选列", prop: "", min_width: 0, kind: ColumnKind::Selection },
    ColumnDef { label: "日志编号", prop: "operId", min_width: 90, kind: ColumnKind::Text },
    ColumnDef { label: "系统模块", prop: "title", min_width: 100, kind: ColumnKind::Text },
    ColumnDef { label: "操作类型", prop: "businessType", min_width: 80, kind: ColumnKind::Text },
    ColumnDef { label: "操作人员", prop: "operName", min_width: 140, kind: ColumnKind::Text },
    ColumnDef { label: "操作地址", prop: "operIp", min_width: 100, kind: ColumnKind::Text },
    ColumnDef { label: "操作状态", prop: "status", min_width: 100, kind: ColumnKind::Status },
    ColumnDef { label: "操作日期", prop: "operTime", min_width: 180, kind: ColumnKind::DateTime },
    ColumnDef { label: "消耗时间", prop: "costTime", min_width: 100, kind: ColumnKind::Duration },
];

/// 状态标签的色调
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTone {
    Success,
    Danger,
}

impl TagTone {
    pub fn of(status: i32) -> Self {
        if status == 1 { TagTone::Success } else { TagTone::Danger }
    }
}

pub fn status_label(status: i32) -> &'static str {
    match TagTone::of(status) {
        TagTone::Success => "成功",
        TagTone::Danger => "失败",
    }
}

impl ColumnDef {
    /// 单元格的展示文本
    pub fn render(&self, row: &OperLog) -> String {
        match (self.kind, self.prop) {
            (ColumnKind::Selection, _) => String::new(),
            (ColumnKind::Status, _) => status_label(row.status).to_string(),
            (ColumnKind::DateTime, _) => row
                .oper_time
                .as_deref()
                .map(format_datetime)
                .unwrap_or_default(),
            (ColumnKind::Duration, _) => format!("{}ms", row.cost_time),
            (ColumnKind::Text, "operId") => row.oper_id.to_string(),
            (ColumnKind::Text, "title") => row.title.clone(),
            (ColumnKind::Text, "businessType") => row.business_type.to_string(),
            (ColumnKind::Text, "operName") => row.oper_name.clone(),
            (ColumnKind::Text, "operIp") => row.oper_ip.clone(),
            (ColumnKind::Text, _) => String::new(),
        }
    }
}
