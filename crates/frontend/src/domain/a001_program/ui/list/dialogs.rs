use crate::shared::components::csv_file_uploader::CsvFileUploader;
use crate::shared::csv_import::CsvImportError;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use contracts::domain::a001_program::aggregate::{ProgramCsvRow, ProgramDto};
use contracts::shared::Record;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

/// Adds a domain typed into the form. Empty input and duplicates are ignored.
fn push_domain(list: &mut Vec<String>, input: &str) -> bool {
    let domain = input.trim().trim_end_matches('.').to_lowercase();
    if domain.is_empty() || list.iter().any(|d| *d == domain) {
        return false;
    }
    list.push(domain);
    true
}

/// Create / edit form. `initial.id` decides which one it is.
#[component]
pub fn ProgramDialog(
    initial: ProgramDto,
    on_submit: Callback<ProgramDto>,
    on_close: Callback<()>,
) -> impl IntoView {
    let is_edit = initial.id.is_some();
    let form = RwSignal::new(initial);
    let new_domain = RwSignal::new(String::new());

    let add_domain = move || {
        let input = new_domain.get_untracked();
        let added = form.try_update(|f| push_domain(&mut f.domains_list, &input)).unwrap_or(false);
        if added {
            new_domain.set(String::new());
        }
    };

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.run(form.get_untracked());
    };

    let title = if is_edit { "Edit Program" } else { "Add Program" };
    let submit_label = if is_edit { "Save Changes" } else { "Add Program" };

    view! {
        <Modal title=title on_close=on_close>
            <form class="form" on:submit=submit>
                <div class="form-group">
                    <label for="program-name">"Program Name"</label>
                    <input
                        id="program-name"
                        type="text"
                        required=true
                        prop:value=move || form.with(|f| f.program.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.program = value);
                        }
                    />
                </div>
                <div class="form-group">
                    <label for="program-platform">"Platform"</label>
                    <input
                        id="program-platform"
                        type="text"
                        placeholder="HackerOne, Bugcrowd, manual..."
                        prop:value=move || form.with(|f| f.platform.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.platform = value);
                        }
                    />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="program-visibility">"Visibility"</label>
                        <select
                            id="program-visibility"
                            prop:value=move || form.with(|f| f.visibility.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.visibility = value);
                            }
                        >
                            <option value="public">"Public"</option>
                            <option value="private">"Private"</option>
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="program-status">"Status"</label>
                        <select
                            id="program-status"
                            prop:value=move || form.with(|f| f.status.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.status = value);
                            }
                        >
                            <option value="active">"Active"</option>
                            <option value="inactive">"Inactive"</option>
                        </select>
                    </div>
                </div>

                <div class="form-group">
                    <label>{move || format!("Domains ({})", form.with(|f| f.domains_list.len()))}</label>
                    <ul class="domain-list">
                        {move || form.with(|f| f.domains_list.clone()).into_iter().map(|domain| {
                            let removed = domain.clone();
                            view! {
                                <li class="domain-list__item">
                                    <span>{domain}</span>
                                    <button
                                        type="button"
                                        class="button button--icon"
                                        title="Remove domain"
                                        on:click=move |_| form.update(|f| f.domains_list.retain(|d| *d != removed))
                                    >
                                        {icon("x")}
                                    </button>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                    <div class="domain-add">
                        <input
                            type="text"
                            placeholder="Add new domain..."
                            prop:value=move || new_domain.get()
                            on:input=move |ev| new_domain.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    add_domain();
                                }
                            }
                        />
                        <button type="button" class="button button--secondary" on:click=move |_| add_domain()>
                            {icon("plus")}
                            "Add"
                        </button>
                    </div>
                </div>

                <div class="form-actions">
                    <button type="button" class="button button--secondary" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="button button--primary">
                        {submit_label}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

/// Confirmation shared by both tabs; `what` names the row, e.g. "program".
#[component]
pub fn ConfirmDeleteDialog(
    what: &'static str,
    record: Record,
    /// Field shown in bold in the question
    label_field: &'static str,
    on_confirm: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let label = record.get_str(label_field).unwrap_or_default().to_string();

    view! {
        <Modal title="Confirm Deletion" on_close=on_close>
            <p>
                {format!("Are you sure you want to delete the {} ", what)}
                <span class="fw-700">{label}</span>
                "? This action cannot be undone."
            </p>
            <div class="form-actions">
                <button type="button" class="button button--secondary" on:click=move |_| on_close.run(())>
                    "Cancel"
                </button>
                <button type="button" class="button button--danger" on:click=move |_| on_confirm.run(())>
                    "Delete"
                </button>
            </div>
        </Modal>
    }
}

#[component]
pub fn ImportCsvDialog(
    /// Rows accepted for import
    on_import: Callback<Vec<ProgramCsvRow>>,
    /// `true` while the import request is in flight
    #[prop(into)]
    importing: Signal<bool>,
    on_close: Callback<()>,
) -> impl IntoView {
    let rows = RwSignal::new(None::<Vec<ProgramCsvRow>>);

    let on_parsed = Callback::new(move |result: Result<Vec<ProgramCsvRow>, CsvImportError>| {
        rows.set(result.ok());
    });

    let import = move |_| {
        if let Some(list) = rows.get_untracked().filter(|r| !r.is_empty()) {
            on_import.run(list);
        }
    };

    view! {
        <Modal title="Import Programs from CSV" on_close=on_close>
            <CsvFileUploader on_parsed=on_parsed label="Select CSV File" />
            {move || rows.get().map(|list| {
                let count = list.len();
                let preview = list.into_iter().take(5).map(|row| view! {
                    <tr>
                        <td>{row.program}</td>
                        <td>{row.platform}</td>
                        <td>{row.visibility}</td>
                        <td>{row.status}</td>
                        <td>{row.apex_domain}</td>
                    </tr>
                }).collect_view();
                view! {
                    <div class="csv-preview">
                        <h4>{format!("Preview ({} rows):", count)}</h4>
                        <table class="csv-preview__table">
                            <tbody>{preview}</tbody>
                        </table>
                    </div>
                }
            })}
            <div class="form-actions">
                <button type="button" class="button button--secondary" on:click=move |_| on_close.run(())>
                    "Cancel"
                </button>
                <button
                    type="button"
                    class="button button--primary"
                    disabled=move || importing.get() || rows.with(|r| r.as_ref().map_or(true, |l| l.is_empty()))
                    on:click=import
                >
                    {icon("upload")}
                    {move || if importing.get() { "Importing..." } else { "Import" }}
                </button>
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_domain_normalizes_and_dedups() {
        let mut list = Vec::new();
        assert!(push_domain(&mut list, " Example.COM. "));
        assert!(!push_domain(&mut list, "example.com"));
        assert!(!push_domain(&mut list, "   "));
        assert!(push_domain(&mut list, "example.net"));
        assert_eq!(list, vec!["example.com".to_string(), "example.net".to_string()]);
    }
}
