use crate::shared::modal::Modal;
use contracts::domain::a002_rdap::aggregate::{RdapItemDraft, RdapKind};
use contracts::shared::{Record, RecordId};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

fn id_string(record: &Record) -> String {
    record.id().map(|id| id.to_string()).unwrap_or_default()
}

/// Program the organization belongs to, as a form value.
fn org_program(organizations: &[Record], org_id: &str) -> Option<String> {
    organizations
        .iter()
        .find(|o| id_string(o) == org_id)
        .and_then(|o| o.get("fk_programs_id"))
        .and_then(RecordId::from_value)
        .map(|id| id.to_string())
}

#[component]
pub fn AddRdapDialog(
    #[prop(into)] programs: Signal<Vec<Record>>,
    #[prop(into)] organizations: Signal<Vec<Record>>,
    on_submit: Callback<RdapItemDraft>,
    on_close: Callback<()>,
) -> impl IntoView {
    let draft = RwSignal::new(RdapItemDraft::default());
    let kind = move || draft.with(|d| RdapKind::parse(&d.kind));

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.run(draft.get_untracked());
    };

    view! {
        <Modal title="Add RDAP Item" on_close=on_close>
            <form id="rdap-add-form" class="form" on:submit=submit>
                <div class="form-group">
                    <label for="rdap-type">"Type"</label>
                    <select
                        id="rdap-type"
                        prop:value=move || draft.with(|d| d.kind.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| {
                                d.kind = value;
                                d.fk_org_id = None;
                            });
                        }
                    >
                        <option value="">"Select type"</option>
                        {RdapKind::SELECTABLE
                            .iter()
                            .map(|k| view! { <option value=k.as_str()>{k.singular()}</option> })
                            .collect_view()}
                    </select>
                </div>

                <Show when=move || kind() == Some(RdapKind::Orgs)>
                    <div class="form-group">
                        <label for="rdap-program">"Program"</label>
                        <select
                            id="rdap-program"
                            prop:value=move || draft.with(|d| d.fk_programs_id.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.fk_programs_id = value);
                            }
                        >
                            <option value="">"Select program"</option>
                            {move || programs.get().iter().map(|p| {
                                let label = p.get_str("program").unwrap_or_default().to_string();
                                view! { <option value=id_string(p)>{label}</option> }
                            }).collect_view()}
                        </select>
                    </div>
                </Show>

                <Show when=move || kind().is_some_and(|k| k != RdapKind::Orgs)>
                    <div class="form-group">
                        <label for="rdap-org">"Organization"</label>
                        <select
                            id="rdap-org"
                            prop:value=move || draft.with(|d| d.fk_org_id.clone().unwrap_or_default())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                let program = organizations.with_untracked(|orgs| org_program(orgs, &value));
                                draft.update(|d| {
                                    d.fk_programs_id = program.unwrap_or_default();
                                    d.fk_org_id = (!value.is_empty()).then_some(value);
                                });
                            }
                        >
                            <option value="">"Select organization"</option>
                            {move || organizations.get().iter().map(|o| {
                                let label = o.get_str("value").unwrap_or_default().to_string();
                                view! { <option value=id_string(o)>{label}</option> }
                            }).collect_view()}
                        </select>
                    </div>
                </Show>

                <Show when=move || kind().is_some()>
                    <div class="form-group">
                        <label for="rdap-value">"Value"</label>
                        <input
                            id="rdap-value"
                            type="text"
                            placeholder=move || format!("Enter {} value", kind().map(|k| k.singular()).unwrap_or_default())
                            prop:value=move || draft.with(|d| d.value.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.value = value);
                            }
                        />
                    </div>
                </Show>
                <div class="form-actions">
                    <button type="button" class="button button--secondary" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="button button--primary">
                        "Add Item"
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn EditRdapDialog(
    record: Record,
    /// New value of the item
    on_submit: Callback<String>,
    on_close: Callback<()>,
) -> impl IntoView {
    let value = RwSignal::new(record.get_str("value").unwrap_or_default().to_string());

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.run(value.get_untracked());
    };

    view! {
        <Modal title="Edit RDAP Item" on_close=on_close>
            <form id="rdap-edit-form" class="form" on:submit=submit>
                <div class="form-group">
                    <label for="rdap-edit-value">"Value"</label>
                    <input
                        id="rdap-edit-value"
                        type="text"
                        required=true
                        prop:value=move || value.get()
                        on:input=move |ev| value.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-actions">
                    <button type="button" class="button button--secondary" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="button button--primary">
                        "Save Changes"
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn DeleteRdapDialog(record: Record, on_confirm: Callback<()>, on_close: Callback<()>) -> impl IntoView {
    let label = match record.get_str("type").and_then(RdapKind::parse) {
        Some(RdapKind::Orgs) => "organization".to_string(),
        Some(kind) => kind.singular().to_lowercase(),
        None => "item".to_string(),
    };
    let value = record.get_str("value").unwrap_or_default().to_string();

    view! {
        <Modal title="Confirm Deletion" on_close=on_close>
            <p>
                {format!("Are you sure you want to delete the RDAP {} ", label)}
                <span class="fw-700">{value}</span>
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_org_program_lookup() {
        let orgs = vec![
            Record::from_value(json!({"id": 1, "value": "ACME", "fk_programs_id": 9})).unwrap(),
            Record::from_value(json!({"id": 2, "value": "Beta"})).unwrap(),
        ];
        assert_eq!(org_program(&orgs, "1").as_deref(), Some("9"));
        assert_eq!(org_program(&orgs, "2"), None);
        assert_eq!(org_program(&orgs, "3"), None);
    }
}
