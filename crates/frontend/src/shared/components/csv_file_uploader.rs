use crate::shared::csv_import::{check_file, parse_programs_csv, CsvImportError};
use contracts::domain::a001_program::aggregate::ProgramCsvRow;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

/// File picker that validates and parses a programs CSV in the browser.
#[component]
pub fn CsvFileUploader(
    /// Parsed rows, or the reason the file was rejected
    on_parsed: Callback<Result<Vec<ProgramCsvRow>, CsvImportError>>,
    #[prop(into, default = "Upload CSV".to_string())] label: String,
) -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let file_name = RwSignal::new(String::new());

    let report = move |result: Result<Vec<ProgramCsvRow>, CsvImportError>| {
        if let Err(e) = &result {
            error.set(Some(e.to_string()));
        }
        on_parsed.run(result);
    };

    let on_change = move |ev: leptos::ev::Event| {
        error.set(None);
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        file_name.set(file.name());

        if let Err(e) = check_file(&file.name(), &file.type_(), file.size() as u64) {
            report(Err(e));
            return;
        }

        spawn_local(async move {
            let result = match JsFuture::from(file.text()).await {
                Ok(text) => parse_programs_csv(&text.as_string().unwrap_or_default()),
                Err(_) => Err(CsvImportError::Parse("file could not be read".to_string())),
            };
            report(result);
        });
    };

    view! {
        <div class="csv-uploader">
            <div class="csv-upload-label">{label}</div>
            <div class="csv-upload-input-row">
                <input
                    type="file"
                    accept=".csv,text/csv"
                    aria-label="Upload CSV file"
                    on:change=on_change
                />
                <Show when=move || !file_name.get().is_empty()>
                    <span class="csv-upload-filename">{move || file_name.get()}</span>
                </Show>
            </div>
            {move || error.get().map(|e| view! {
                <div class="csv-upload-error" role="alert">{e}</div>
            })}
        </div>
    }
}
