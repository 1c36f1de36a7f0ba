//! Fixed vocabularies used during normalization.
//!
//! Display names, keyword lists and literal tags are storefront data, not
//! logic, and live here so the normalizers stay free of string tables.

/// Filter code to the Russian display name used as a metadata key.
/// Codes not listed here are used verbatim.
pub const FILTER_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("categories", "Категория"),
    ("strana", "Страна"),
    ("brend", "Бренд"),
    ("proizvoditel", "Производитель"),
    ("vid-upakovki", "Вид упаковки"),
    ("dopolnitelno", "Дополнительно"),
    ("cvet", "Цвет"),
    ("obem", "Объем"),
    ("ves", "Вес"),
    ("tovary-so-skidkoi", "Товары со скидкой"),
    ("cena", "Цена"),
    ("v-nalicii", "В наличии"),
    ("tip-piva", "Тип пива"),
    ("sort-piva", "Сорт пива"),
    ("podarocnaya-upakovka", "Подарочная упаковка"),
    ("sort-vina", "Сорт вина"),
    ("tip-vina", "Тип вина"),
    ("vkus", "Вкус"),
    ("osobennosti", "Особенности"),
    ("s-ostavom", "С составом"),
    ("bez-sostava", "Без состава"),
    ("soderzanie-saxara", "Содержание сахара"),
    ("vid", "Вид"),
    ("sortovoi-sostav", "Сортовой состав"),
    ("region", "Регион"),
    ("emkost-vyderzki", "Емкость выдержки"),
    ("temperatura-podaci", "Температура подачи"),
];

/// Gastronomic pairing group to its display label.
pub const GASTRONOMIC_GROUPS: &[(&str, &str)] = &[
    ("poultry", "С птицей"),
    ("meat", "С мясом"),
    ("fish", "С рыбой"),
    ("cheese", "С сыром"),
    ("dessert", "С десертом"),
];

/// Canonical color to the stems that count as that color appearing in a title.
pub const COLOR_INDICATORS: &[(&str, &[&str])] = &[
    ("светлое", &["светл", "светное"]),
    ("темное", &["темн", "темное"]),
    ("красное", &["красн", "красное"]),
    ("белое", &["бел", "белое"]),
    ("розовое", &["розов", "розовое"]),
    ("черное", &["черн", "черное"]),
];

/// Category name fragments that mark a food product.
pub const FOOD_KEYWORDS: &[&str] = &[
    "продукты",
    "снеки",
    "шоколад",
    "сыр",
    "мясо",
    "закуски",
    "бакалея",
    "консервация",
    "конфеты",
];

/// Category name fragments that mark a drink.
pub const DRINK_KEYWORDS: &[&str] = &[
    "напитки",
    "пиво",
    "вино",
    "сидр",
    "медовуха",
    "алкоголь",
    "водка",
    "коньяк",
    "виски",
];

/// Title tokens meaning a weight is already stated.
pub const WEIGHT_UNITS: &[&str] = &["г", "гр", "грамм", "кг", "g", "gr"];

/// Title tokens meaning a volume is already stated.
pub const VOLUME_UNITS: &[&str] = &["л", "литр", "ml", "мл"];

/// Appended to a bare numeric volume taken from a filter label.
pub const VOLUME_SUFFIX: &str = " Л";

/// Availability phrases that force a product out of stock.
pub const OUT_OF_STOCK_PHRASES: &[&str] = &["нет в наличии", "недоступен", "отсутствует"];

/// Filter code whose label titles are promotion tags.
pub const DISCOUNT_FILTER: &str = "tovary-so-skidkoi";

/// Description block title holding the long-form description.
pub const DESCRIPTION_BLOCK_TITLE: &str = "Описание";

pub const TAG_NEW: &str = "Новинка";
pub const TAG_RECOMMENDED: &str = "Рекомендуемое";
pub const TAG_ONLINE_PRICE: &str = "Выгодно онлайн";
pub const TAG_DISCOUNT: &str = "Скидка";

/// How a true flag is written into metadata.
pub const YES: &str = "Да";

/// Store quantity used when a store omits it.
pub const DEFAULT_STORE_QUANTITY: &str = "0 шт";

/// Looks up `key` in a static pair table.
#[must_use]
pub fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Display name for a filter code, falling back to the code itself.
#[must_use]
pub fn filter_display_name(code: &str) -> &str {
    lookup(FILTER_DISPLAY_NAMES, code).unwrap_or(code)
}

/// Display label for a gastronomic group, falling back to the group name.
#[must_use]
pub fn gastronomic_display_name(group: &str) -> &str {
    lookup(GASTRONOMIC_GROUPS, group).unwrap_or(group)
}
