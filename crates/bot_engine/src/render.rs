//! Outbound prompt and keyboard construction.
//!
//! Every user-visible string of the dialogue lives here, so step handlers
//! and the engine stay free of copy text.

use bot_core::category::{category_label, CATEGORIES};
use bot_core::{encode_action, Button, CallbackVerb, DraftPayload, Flow, Keyboard, Response};

fn menu_keyboard(app_base_url: Option<&str>) -> Keyboard {
    let mut keyboard = vec![
        vec![Button::callback(
            "Я потерял вещь",
            encode_action(Flow::Lost, CallbackVerb::Start, None),
        )],
        vec![Button::callback(
            "Я нашёл вещь",
            encode_action(Flow::Found, CallbackVerb::Start, None),
        )],
    ];
    if let Some(url) = app_base_url {
        keyboard.push(vec![Button::url("Карта объявлений", url)]);
    }
    keyboard
}

pub fn main_menu(app_base_url: Option<&str>) -> Response {
    Response::with_keyboard(
        "Привет! Я бот бюро находок. Выберите, что случилось:",
        menu_keyboard(app_base_url),
    )
}

/// Fallback for free text the bot does not understand while idle.
pub fn menu_hint(app_base_url: Option<&str>) -> Response {
    Response::with_keyboard(
        "Я вас не понял. Воспользуйтесь меню:",
        menu_keyboard(app_base_url),
    )
}

pub fn flow_intro(flow: Flow) -> Response {
    match flow {
        Flow::Lost => Response::text("Оформляем заявку о пропаже."),
        Flow::Found => Response::text("Оформляем заявку о находке."),
    }
}

pub fn category_prompt(flow: Flow) -> Response {
    let mut keyboard: Keyboard = CATEGORIES
        .chunks(2)
        .map(|row| {
            row.iter()
                .map(|category| {
                    Button::callback(
                        category.label,
                        encode_action(flow, CallbackVerb::Category, Some(category.id)),
                    )
                })
                .collect()
        })
        .collect();
    keyboard.push(vec![Button::callback(
        "Отмена",
        encode_action(flow, CallbackVerb::Cancel, None),
    )]);
    Response::with_keyboard("Что за вещь? Выберите категорию:", keyboard)
}

pub fn unknown_category() -> Response {
    Response::text("Такой категории нет. Выберите категорию кнопкой.")
}

pub fn attributes_prompt(flow: Flow) -> Response {
    match flow {
        Flow::Lost => Response::text(
            "Опишите вещь: что это, цвет, особые приметы. Чем подробнее описание, тем выше шанс совпадения.",
        ),
        Flow::Found => Response::text(
            "Опишите найденную вещь: что это, цвет, особые приметы.",
        ),
    }
}

pub fn attributes_too_short() -> Response {
    Response::text("Слишком коротко. Опишите вещь хотя бы парой слов.")
}

pub fn photo_stub() -> Response {
    Response::text("Фото пока не поддерживаются, пропускаем этот шаг.")
}

pub fn location_prompt(flow: Flow) -> Response {
    match flow {
        Flow::Lost => Response::text(
            "Где вы могли потерять вещь? Отправьте геопозицию или опишите место текстом.",
        ),
        Flow::Found => Response::text(
            "Где вы нашли вещь? Отправьте геопозицию или опишите место текстом.",
        ),
    }
}

pub fn location_missing() -> Response {
    Response::text("Нужно указать место: отправьте геопозицию или опишите его текстом.")
}

pub fn secrets_prompt() -> Response {
    Response::text(
        "Назовите до трёх секретных примет, известных только владельцу (через запятую). Отправьте /skip, чтобы пропустить.",
    )
}

pub fn confirm_summary(payload: &DraftPayload) -> Response {
    let listing = &payload.listing;
    let mut lines = vec!["Проверьте заявку:".to_string()];
    lines.push(format!("Тип: {}", listing.kind.label()));
    if let Some(category) = &listing.category {
        lines.push(format!("Категория: {}", category_label(category)));
    }
    if !listing.details.is_empty() {
        lines.push(format!("Описание: {}", listing.details));
    }
    match (&listing.location, listing.location_note.is_empty()) {
        (Some(point), true) => lines.push(format!(
            "Место: {:.5}, {:.5}",
            point.latitude, point.longitude
        )),
        (Some(point), false) => lines.push(format!(
            "Место: {:.5}, {:.5} ({})",
            point.latitude, point.longitude, listing.location_note
        )),
        (None, false) => lines.push(format!("Место: {}", listing.location_note)),
        (None, true) => {}
    }
    if listing.secrets.is_empty() {
        lines.push("Секретные приметы: нет".to_string());
    } else {
        lines.push(format!("Секретные приметы: {} шт.", listing.secrets.len()));
    }

    let keyboard = vec![
        vec![Button::callback(
            "Опубликовать",
            encode_action(payload.flow, CallbackVerb::Confirm, Some("publish")),
        )],
        vec![Button::callback(
            "Изменить описание",
            encode_action(payload.flow, CallbackVerb::Confirm, Some("edit")),
        )],
        vec![Button::callback(
            "Отмена",
            encode_action(payload.flow, CallbackVerb::Cancel, None),
        )],
    ];
    Response::with_keyboard(lines.join("\n"), keyboard)
}

pub fn publish_stub() -> Response {
    Response::text("Спасибо! Публикация объявлений скоро заработает.")
}

pub fn cancelled() -> Response {
    Response::text("Действие отменено.")
}

pub fn unknown_action() -> Response {
    Response::text("Неизвестное действие.")
}

pub fn stale_flow() -> Response {
    Response::text("Эта кнопка из другой заявки. Отправьте /cancel и начните заново.")
}

pub fn choose_flow_first() -> Response {
    Response::text("Сначала выберите, что случилось.")
}

pub fn step_not_implemented() -> Response {
    Response::text("Этот шаг не принимает сообщения. Отправьте /cancel, чтобы начать заново.")
}

pub fn no_handler() -> Response {
    Response::text("Для этого шага нет обработчика. Отправьте /cancel, чтобы начать заново.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bot_core::{ButtonAction, GeoPoint};

    #[test]
    fn test_menu_has_both_flow_starts() {
        let menu = main_menu(None);
        let keyboard = menu.keyboard.unwrap();
        assert_eq!(keyboard.len(), 2);
        assert_eq!(
            keyboard[0][0].action,
            ButtonAction::Callback("flow:lost:start".to_string())
        );
        assert_eq!(
            keyboard[1][0].action,
            ButtonAction::Callback("flow:found:start".to_string())
        );
    }

    #[test]
    fn test_menu_map_button_only_when_configured() {
        let keyboard = main_menu(Some("http://localhost:5173")).keyboard.unwrap();
        assert_eq!(keyboard.len(), 3);
        assert_eq!(
            keyboard[2][0].action,
            ButtonAction::Url("http://localhost:5173".to_string())
        );
    }

    #[test]
    fn test_category_grid_covers_catalog_plus_cancel() {
        let keyboard = category_prompt(Flow::Lost).keyboard.unwrap();
        let buttons: usize = keyboard.iter().map(|row| row.len()).sum();
        assert_eq!(buttons, CATEGORIES.len() + 1);
        let last = keyboard.last().unwrap();
        assert_eq!(
            last[0].action,
            ButtonAction::Callback("flow:lost:cancel".to_string())
        );
    }

    #[test]
    fn test_confirm_summary_mentions_draft_fields() {
        let payload = DraftPayload::new(Flow::Lost)
            .with_category("keys")
            .with_details("связка ключей")
            .with_location(Some(GeoPoint::new(55.75, 37.62)), Some("у метро"))
            .with_secrets(vec!["брелок".into()]);
        let summary = confirm_summary(&payload);
        assert!(summary.text.contains("Потеряно"));
        assert!(summary.text.contains("Ключи"));
        assert!(summary.text.contains("связка ключей"));
        assert!(summary.text.contains("у метро"));
        assert!(summary.text.contains("1 шт."));
        assert_eq!(summary.keyboard.map(|k| k.len()), Some(3));
    }
}
