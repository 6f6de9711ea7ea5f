/// Утилиты для списков: поле поиска и индикаторы сортировки
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Задержка перед применением поискового запроса
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для отображения)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let input_value = RwSignal::new(value.get_untracked());

    // Каждый ввод увеличивает поколение; срабатывает только последний таймер
    let generation = StoredValue::new(0u64);

    let handle_input_change = move |new_value: String| {
        input_value.set(new_value.clone());
        let current = generation.get_value() + 1;
        generation.set_value(current);

        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if generation.get_value() == current {
                on_change.run(new_value);
            }
        });
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        generation.update_value(|g| *g += 1);
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div style="position: relative; display: inline-flex; align-items: center;">
            <input
                type="text"
                placeholder=placeholder
                style=move || format!(
                    "width: 250px; padding: 6px 32px 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 15px; background: {};",
                    if is_filter_active() { "#fffbea" } else { "white" }
                )
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    let val = event_target_value(&ev);
                    handle_input_change(val);
                }
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button
                        style="position: absolute; right: 6px; background: none; border: none; cursor: pointer; padding: 4px; display: inline-flex; align-items: center; color: #666; line-height: 1;"
                        on:click=clear_filter
                        title="Clear"
                    >
                        {crate::shared::icons::icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

/// CSS-класс индикатора: активная колонка подсвечивается
pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-icon table__sort-icon--active"
    } else {
        "table__sort-icon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "name", false), " ▼");
        assert_eq!(get_sort_indicator("name", "value", true), " ⇅");
        assert_eq!(get_sort_indicator("", "value", true), " ⇅");
    }

    #[test]
    fn test_sort_class() {
        assert!(get_sort_class("name", "name").ends_with("--active"));
        assert_eq!(get_sort_class("name", "value"), "table__sort-icon");
    }
}
