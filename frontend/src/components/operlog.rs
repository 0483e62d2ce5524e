use crate::components::layout::AdminLayout;
use crate::session::use_session;
use crate::web::http::FetchHttpClient;
use crate::web::toast::{Toaster, use_toaster};
use leptos::prelude::*;
use leptos::task::spawn_local;
use pureadmin::operlog::{COLUMNS, ColumnDef, ColumnKind, TagTone};
use pureadmin::{AdminResult, MessageKind, Notifier, OperLogState, OperLogView, TableSelection};
use pureadmin_shared::OperLog;
use std::future::Future;
use std::rc::Rc;

type OperLogVm = OperLogView<FetchHttpClient>;

const PAGE_SIZES: [u32; 4] = [10, 20, 50, 100];

/// 表格的勾选状态
#[derive(Clone, Copy)]
struct SelectionTable {
    selected: RwSignal<Vec<i64>>,
}

impl TableSelection for SelectionTable {
    fn selected_ids(&self) -> Vec<i64> {
        self.selected.get_untracked()
    }

    fn clear_selection(&self) {
        self.selected.set(Vec::new());
    }
}

/// 在后台执行视图操作，传输错误交给消息提示
fn run<F>(toaster: Toaster, fut: F)
where
    F: Future<Output = AdminResult<()>> + 'static,
{
    spawn_local(async move {
        if let Err(e) = fut.await {
            toaster.message(&format!("请求失败: {}", e.message), MessageKind::Error);
        }
    });
}

fn cell_view(column: &ColumnDef, row: &OperLog) -> AnyView {
    let text = column.render(row);
    match column.kind {
        ColumnKind::Status => {
            let class = match TagTone::of(row.status) {
                TagTone::Success => "badge badge-success",
                TagTone::Danger => "badge badge-error",
            };
            view! { <td><span class=class>{text}</span></td> }.into_any()
        }
        _ => view! { <td>{text}</td> }.into_any(),
    }
}

#[component]
pub fn OperLogPage() -> impl IntoView {
    let session = use_session();
    let toaster = use_toaster();

    let table = SelectionTable {
        selected: RwSignal::new(Vec::new()),
    };
    let api = session.store().api().clone();
    let view_model: OperLogVm = OperLogView::new(api, Rc::new(toaster), Rc::new(table));

    let state = RwSignal::new(view_model.state());
    view_model.subscribe(move |snapshot| state.set(snapshot.clone()));
    let vm = StoredValue::new_local(Rc::new(view_model));

    let (begin_date, set_begin_date) = signal(String::new());
    let (end_date, set_end_date) = signal(String::new());

    // 挂载时查询一次
    {
        let vm = vm.get_value();
        run(toaster, async move { vm.on_mount().await });
    }

    let sync_date_range = move || {
        let (begin, end) = (begin_date.get_untracked(), end_date.get_untracked());
        vm.get_value().update_form(|f| {
            f.date_range = if begin.is_empty() || end.is_empty() {
                Vec::new()
            } else {
                vec![format!("{} 00:00:00", begin), format!("{} 23:59:59", end)]
            };
        });
    };

    let on_search = move |_| {
        let vm = vm.get_value();
        run(toaster, async move { vm.on_search().await });
    };

    let on_reset = move |_| {
        set_begin_date.set(String::new());
        set_end_date.set(String::new());
        let vm = vm.get_value();
        run(toaster, async move { vm.reset_form().await });
    };

    let on_batch_del = move |_| {
        let vm = vm.get_value();
        run(toaster, async move { vm.on_batch_del().await });
    };

    let on_clear_all = move |_| {
        let vm = vm.get_value();
        run(toaster, async move { vm.clear_all().await });
    };

    let toggle_row = move |id: i64, checked: bool| {
        table.selected.update(|ids| {
            if checked {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            } else {
                ids.retain(|x| *x != id);
            }
        });
        vm.get_value()
            .handle_selection_change(table.selected.with_untracked(|ids| ids.len()));
    };

    let form = move || state.get().form;
    let selected_num = move || state.with(|s: &OperLogState| s.selected_num);
    let pagination = move || state.get().pagination;

    view! {
        <AdminLayout>
            <div class="space-y-4">
                // 筛选表单
                <div class="card bg-base-100 shadow">
                    <div class="card-body flex-row flex-wrap gap-4 items-end">
                        <label class="form-control w-40">
                            <span class="label-text">"系统模块"</span>
                            <input
                                type="text"
                                class="input input-bordered input-sm"
                                placeholder="请输入系统模块"
                                prop:value=move || form().title
                                on:input=move |ev| {
                                    let v = event_target_value(&ev);
                                    vm.get_value().update_form(|f| f.title = v);
                                }
                            />
                        </label>
                        <label class="form-control w-40">
                            <span class="label-text">"操作人员"</span>
                            <input
                                type="text"
                                class="input input-bordered input-sm"
                                placeholder="请输入操作人员"
                                prop:value=move || form().oper_name
                                on:input=move |ev| {
                                    let v = event_target_value(&ev);
                                    vm.get_value().update_form(|f| f.oper_name = v);
                                }
                            />
                        </label>
                        <label class="form-control w-40">
                            <span class="label-text">"操作地址"</span>
                            <input
                                type="text"
                                class="input input-bordered input-sm"
                                placeholder="请输入操作地址"
                                prop:value=move || form().oper_ip
                                on:input=move |ev| {
                                    let v = event_target_value(&ev);
                                    vm.get_value().update_form(|f| f.oper_ip = v);
                                }
                            />
                        </label>
                        <label class="form-control w-32">
                            <span class="label-text">"操作状态"</span>
                            <select
                                class="select select-bordered select-sm"
                                prop:value=move || form().status
                                on:change=move |ev| {
                                    let v = event_target_value(&ev);
                                    vm.get_value().update_form(|f| f.status = v);
                                }
                            >
                                <option value="">"全部"</option>
                                <option value="1">"成功"</option>
                                <option value="0">"失败"</option>
                            </select>
                        </label>
                        <label class="form-control">
                            <span class="label-text">"操作时间"</span>
                            <div class="flex gap-2">
                                <input
                                    type="date"
                                    class="input input-bordered input-sm"
                                    prop:value=begin_date
                                    on:change=move |ev| {
                                        set_begin_date.set(event_target_value(&ev));
                                        sync_date_range();
                                    }
                                />
                                <input
                                    type="date"
                                    class="input input-bordered input-sm"
                                    prop:value=end_date
                                    on:change=move |ev| {
                                        set_end_date.set(event_target_value(&ev));
                                        sync_date_range();
                                    }
                                />
                            </div>
                        </label>
                        <div class="flex gap-2">
                            <button
                                class="btn btn-primary btn-sm"
                                disabled=move || state.with(|s| s.loading)
                                on:click=on_search
                            >
                                "搜索"
                            </button>
                            <button class="btn btn-sm" on:click=on_reset>"重置"</button>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-4">
                            <h3 class="card-title">"操作日志"</h3>
                            <button class="btn btn-error btn-sm" on:click=on_clear_all>"清空日志"</button>
                        </div>

                        <Show when=move || { selected_num() > 0 }>
                            <div class="alert mx-4 mb-2 py-2 flex justify-between">
                                <span>"已选 " {selected_num} " 项"</span>
                                <div class="flex gap-2">
                                    <button
                                        class="btn btn-ghost btn-xs"
                                        on:click=move |_| vm.get_value().on_selection_cancel()
                                    >
                                        "取消选择"
                                    </button>
                                    <button class="btn btn-error btn-xs" on:click=on_batch_del>"批量删除"</button>
                                </div>
                            </div>
                        </Show>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        {COLUMNS
                                            .iter()
                                            .map(|c| match c.kind {
                                                ColumnKind::Selection => view! { <th></th> }.into_any(),
                                                _ => view! {
                                                    <th style=format!("min-width: {}px", c.min_width)>{c.label}</th>
                                                }
                                                .into_any(),
                                            })
                                            .collect_view()}
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || state.with(|s| s.loading)>
                                        <tr>
                                            <td colspan=COLUMNS.len().to_string() class="text-center py-8">
                                                <span class="loading loading-spinner"></span>
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || state.with(|s| !s.loading && s.data_list.is_empty())>
                                        <tr>
                                            <td colspan=COLUMNS.len().to_string() class="text-center py-8 text-base-content/50">
                                                "暂无数据"
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || state.get().data_list
                                        key=|row| row.oper_id
                                        children=move |row| {
                                            let id = row.oper_id;
                                            let checked = move || table.selected.with(|ids| ids.contains(&id));
                                            let cells = COLUMNS
                                                .iter()
                                                .filter(|c| c.kind != ColumnKind::Selection)
                                                .map(|c| cell_view(c, &row))
                                                .collect_view();
                                            view! {
                                                <tr>
                                                    <td>
                                                        <input
                                                            type="checkbox"
                                                            class="checkbox checkbox-sm"
                                                            prop:checked=checked
                                                            on:change=move |ev| toggle_row(id, event_target_checked(&ev))
                                                        />
                                                    </td>
                                                    {cells}
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>

                        // 分页
                        <div class="flex items-center justify-end gap-4 p-4">
                            <span class="text-sm">"共 " {move || pagination().total} " 条"</span>
                            <select
                                class="select select-bordered select-sm"
                                prop:value=move || pagination().page_size.to_string()
                                on:change=move |ev| {
                                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                                        vm.get_value().handle_size_change(size);
                                    }
                                }
                            >
                                {PAGE_SIZES
                                    .into_iter()
                                    .map(|s| view! { <option value=s.to_string()>{format!("{} 条/页", s)}</option> })
                                    .collect_view()}
                            </select>
                            <div class="join">
                                <button
                                    class="join-item btn btn-sm"
                                    on:click=move |_| {
                                        let page = pagination().current_page.saturating_sub(1).max(1);
                                        vm.get_value().handle_current_change(page);
                                    }
                                >
                                    "«"
                                </button>
                                <button class="join-item btn btn-sm">{move || pagination().current_page}</button>
                                <button
                                    class="join-item btn btn-sm"
                                    on:click=move |_| {
                                        vm.get_value().handle_current_change(pagination().current_page + 1);
                                    }
                                >
                                    "»"
                                </button>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </AdminLayout>
    }
}
