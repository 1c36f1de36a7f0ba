use serde_json::json;

use super::*;

fn title(value: serde_json::Value) -> String {
    build_title(&serde_json::from_value(value).unwrap())
}

fn beer_category() -> serde_json::Value {
    json!({"name": "Светлое пиво", "parent": {"name": "Пиво и сидр"}})
}

#[test]
fn volume_label_is_appended_with_liter_suffix() {
    let t = title(json!({
        "name": "Пиво Жигулевское",
        "filter_labels": [{"filter": "obem", "title": "0.5"}]
    }));
    assert_eq!(t, "Пиво Жигулевское, 0.5 Л");
}

#[test]
fn stated_volume_leaves_title_unchanged() {
    let t = title(json!({
        "name": "Вино Шардоне 0.75 л",
        "filter_labels": [{"filter": "obem", "title": "0.75"}]
    }));
    assert_eq!(t, "Вино Шардоне 0.75 л");
}

#[test]
fn standalone_unit_word_counts_as_stated() {
    let t = title(json!({
        "name": "Квас Хлебный 1,5 Л",
        "filter_labels": [{"filter": "obem", "title": "1.5"}]
    }));
    assert_eq!(t, "Квас Хлебный 1,5 Л");
}

#[test]
fn name_is_trimmed() {
    let t = title(json!({"name": "  Водка Белуга  "}));
    assert_eq!(t, "Водка Белуга");
}

#[test]
fn empty_name_gives_empty_title() {
    let t = title(json!({
        "name": "   ",
        "filter_labels": [{"filter": "obem", "title": "0.5"}]
    }));
    assert_eq!(t, "");
}

#[test]
fn last_filter_label_wins() {
    let t = title(json!({
        "name": "Пиво Балтика",
        "filter_labels": [
            {"filter": "obem", "title": "0.33"},
            {"filter": "obem", "title": "0.45 л"}
        ]
    }));
    assert_eq!(t, "Пиво Балтика, 0.45 л");
}

#[test]
fn drink_prefers_volume_over_weight() {
    let t = title(json!({
        "name": "Пиво Хамовники",
        "category": beer_category(),
        "filter_labels": [
            {"filter": "ves", "title": "500 г"},
            {"filter": "obem", "title": "0.5"}
        ]
    }));
    assert_eq!(t, "Пиво Хамовники, 0.5 Л");
}

#[test]
fn food_prefers_weight_over_volume() {
    let t = title(json!({
        "name": "Сыр Маасдам",
        "category": {"name": "Сыры", "parent": {"name": "Продукты"}},
        "filter_labels": [
            {"filter": "obem", "title": "0.5"},
            {"filter": "ves", "title": "200 г"}
        ]
    }));
    assert_eq!(t, "Сыр Маасдам, 200 г");
}

#[test]
fn drink_color_appended_when_volume_stated() {
    let t = title(json!({
        "name": "Вино Мерло 0.75 л",
        "category": {"name": "Вино", "parent": {"name": "Тихое вино"}},
        "filter_labels": [
            {"filter": "obem", "title": "0.75"},
            {"filter": "cvet", "title": "Красное"}
        ]
    }));
    assert_eq!(t, "Вино Мерло 0.75 л, Красное");
}

#[test]
fn color_stem_counts_as_stated() {
    let t = title(json!({
        "name": "Пиво Светлый Лагер 0.5 л",
        "category": beer_category(),
        "filter_labels": [
            {"filter": "obem", "title": "0.5"},
            {"filter": "cvet", "title": "Светлое"}
        ]
    }));
    assert_eq!(t, "Пиво Светлый Лагер 0.5 л");
}

#[test]
fn volume_from_range_block_when_no_label() {
    let t = title(json!({
        "name": "Коньяк Арарат",
        "category": {"name": "Коньяк"},
        "description_blocks": [
            {"code": "obem", "type": "range", "min": 0.7, "unit": "л"}
        ]
    }));
    assert_eq!(t, "Коньяк Арарат, 0.7 л");
}

#[test]
fn range_block_without_unit_has_no_trailing_space() {
    let t = title(json!({
        "name": "Настойка Рябина",
        "description_blocks": [{"code": "ves", "type": "range", "min": 250, "unit": ""}]
    }));
    assert_eq!(t, "Настойка Рябина, 250");
}

#[test]
fn weight_from_select_block_needs_a_digit() {
    let t = title(json!({
        "name": "Чипсы Картофельные",
        "category": {"name": "Снеки"},
        "description_blocks": [{
            "code": "ves",
            "type": "select",
            "values": [
                {"name": "Большая пачка", "enabled": true},
                {"name": "150 г", "enabled": false},
                {"name": "90 г", "enabled": true}
            ]
        }]
    }));
    assert_eq!(t, "Чипсы Картофельные, 90 г");
}

#[test]
fn filter_label_takes_priority_over_block() {
    let t = title(json!({
        "name": "Ром Бакарди",
        "filter_labels": [{"filter": "obem", "title": "1"}],
        "description_blocks": [{"code": "obem", "type": "range", "min": 0.5, "unit": "л"}]
    }));
    assert_eq!(t, "Ром Бакарди, 1 Л");
}

#[test]
fn weight_unit_in_name_counts_as_stated() {
    let t = title(json!({
        "name": "Шоколад Горький 100г",
        "category": {"name": "Шоколад"},
        "filter_labels": [{"filter": "ves", "title": "0.1 кг"}]
    }));
    assert_eq!(t, "Шоколад Горький 100г");
}

#[test]
fn descriptor_without_number_is_appended() {
    let t = title(json!({
        "name": "Орешки Ассорти",
        "category": {"name": "Закуски"},
        "filter_labels": [{"filter": "ves", "title": "Большая упаковка"}]
    }));
    assert_eq!(t, "Орешки Ассорти, Большая упаковка");
}

#[test]
fn at_most_one_descriptor_is_appended() {
    let t = title(json!({
        "name": "Сидр Яблочный",
        "category": {"name": "Сидр"},
        "filter_labels": [
            {"filter": "obem", "title": "0.33"},
            {"filter": "cvet", "title": "Золотой"},
            {"filter": "ves", "title": "400 г"}
        ]
    }));
    assert_eq!(t, "Сидр Яблочный, 0.33 Л");
}

#[test]
fn no_descriptors_leaves_name() {
    assert_eq!(title(json!({"name": "Бокал для вина"})), "Бокал для вина");
}

#[test]
fn build_title_is_idempotent() {
    let product: RawProduct = serde_json::from_value(json!({
        "name": "Пиво Жигулевское",
        "filter_labels": [{"filter": "obem", "title": "0.5"}]
    }))
    .unwrap();
    assert_eq!(build_title(&product), build_title(&product));
}
