use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "en" => Some(Locale::En),
            "ru" => Some(Locale::Ru),
            _ => None,
        }
    }
}

/// `(locale, native display name)` pairs for locale pickers.
pub fn available_locales() -> [(Locale, &'static str); 2] {
    [(Locale::En, "English"), (Locale::Ru, "Русский")]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCategory {
    CreatureTypes,
    Sizes,
    Alignments,
    DamageTypes,
    Conditions,
    SpellSchools,
    SpellClasses,
    ActionTypes,
    EncounterTypes,
}

pub type SubscriptionId = u64;

type LocaleListener = Box<dyn FnMut(Locale) + Send>;

/// Holds the active locale plus the listeners interested in changes. Passed
/// to whoever renders localized text; there is no process-wide instance.
pub struct LocaleContext {
    locale: Locale,
    listeners: Vec<(SubscriptionId, LocaleListener)>,
    next_subscription: SubscriptionId,
}

impl Default for LocaleContext {
    fn default() -> Self {
        Self::new(Locale::En)
    }
}

impl LocaleContext {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Listeners run synchronously, and only when the locale actually
    /// changes; setting the current locale again is a no-op.
    pub fn set_locale(&mut self, locale: Locale) {
        if self.locale == locale {
            return;
        }
        self.locale = locale;
        for (_, listener) in &mut self.listeners {
            listener(locale);
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(Locale) + Send + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Dotted-key UI lookup. Missing keys fall back to English, then to the
    /// key itself.
    pub fn text(&self, key: &str) -> String {
        ui_text(self.locale, key)
            .or_else(|| ui_text(Locale::En, key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    /// `text` with `{param}` placeholders substituted.
    pub fn text_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        let mut text = self.text(key);
        for (name, value) in params {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        text
    }

    /// Localized label for a canonical game-data key. Records store the
    /// canonical key; localization is display-only. Unknown keys echo back.
    pub fn game_label(&self, category: GameCategory, key: &str) -> String {
        game_label(self.locale, category, key)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }
}

/* ---------------- canonical game-data keys ---------------- */

pub const CREATURE_TYPES: [&str; 14] = [
    "aberration",
    "beast",
    "celestial",
    "construct",
    "dragon",
    "elemental",
    "fey",
    "fiend",
    "giant",
    "humanoid",
    "monstrosity",
    "ooze",
    "plant",
    "undead",
];

pub const CREATURE_SIZES: [&str; 6] = ["tiny", "small", "medium", "large", "huge", "gargantuan"];

pub const ALIGNMENTS: [&str; 10] = [
    "no_alignment",
    "lawful_good",
    "neutral_good",
    "chaotic_good",
    "lawful_neutral",
    "neutral",
    "chaotic_neutral",
    "lawful_evil",
    "neutral_evil",
    "chaotic_evil",
];

pub const DAMAGE_TYPES: [&str; 16] = [
    "bludgeoning",
    "piercing",
    "slashing",
    "fire",
    "poison",
    "cold",
    "necrotic",
    "radiant",
    "acid",
    "force",
    "lightning",
    "psychic",
    "thunder",
    "silvered_weapons",
    "adamantine_weapons",
    "magic_weapons",
];

pub const CONDITIONS: [&str; 16] = [
    "blinded",
    "charmed",
    "deafened",
    "exhausted",
    "frightened",
    "grappled",
    "incapacitated",
    "invisible",
    "mute",
    "paralyzed",
    "petrified",
    "poisoned",
    "prone",
    "restrained",
    "stunned",
    "unconscious",
];

/// Spell schools in the canonical order panels group by.
pub const SPELL_SCHOOLS: [&str; 8] = [
    "abjuration",
    "conjuration",
    "divination",
    "enchantment",
    "evocation",
    "illusion",
    "necromancy",
    "transmutation",
];

pub const SPELL_CLASSES: [&str; 9] = [
    "bard",
    "cleric",
    "druid",
    "paladin",
    "ranger",
    "sorcerer",
    "warlock",
    "wizard",
    "artificer",
];

pub const ACTION_TYPES: [&str; 5] = ["action", "bonus_action", "reaction", "minute", "hour"];

pub const ENCOUNTER_TYPES: [&str; 4] = ["combat", "hazard", "chase", "random"];

/// Canonical keys of a category, in display order.
pub fn category_keys(category: GameCategory) -> &'static [&'static str] {
    match category {
        GameCategory::CreatureTypes => &CREATURE_TYPES,
        GameCategory::Sizes => &CREATURE_SIZES,
        GameCategory::Alignments => &ALIGNMENTS,
        GameCategory::DamageTypes => &DAMAGE_TYPES,
        GameCategory::Conditions => &CONDITIONS,
        GameCategory::SpellSchools => &SPELL_SCHOOLS,
        GameCategory::SpellClasses => &SPELL_CLASSES,
        GameCategory::ActionTypes => &ACTION_TYPES,
        GameCategory::EncounterTypes => &ENCOUNTER_TYPES,
    }
}

fn game_label(locale: Locale, category: GameCategory, key: &str) -> Option<&'static str> {
    match locale {
        Locale::En => game_label_en(category, key),
        Locale::Ru => game_label_ru(category, key),
    }
}

fn game_label_en(category: GameCategory, key: &str) -> Option<&'static str> {
    use GameCategory::*;
    Some(match (category, key) {
        (CreatureTypes, "aberration") => "Aberration",
        (CreatureTypes, "beast") => "Beast",
        (CreatureTypes, "celestial") => "Celestial",
        (CreatureTypes, "construct") => "Construct",
        (CreatureTypes, "dragon") => "Dragon",
        (CreatureTypes, "elemental") => "Elemental",
        (CreatureTypes, "fey") => "Fey",
        (CreatureTypes, "fiend") => "Fiend",
        (CreatureTypes, "giant") => "Giant",
        (CreatureTypes, "humanoid") => "Humanoid",
        (CreatureTypes, "monstrosity") => "Monstrosity",
        (CreatureTypes, "ooze") => "Ooze",
        (CreatureTypes, "plant") => "Plant",
        (CreatureTypes, "undead") => "Undead",
        (Sizes, "tiny") => "Tiny",
        (Sizes, "small") => "Small",
        (Sizes, "medium") => "Medium",
        (Sizes, "large") => "Large",
        (Sizes, "huge") => "Huge",
        (Sizes, "gargantuan") => "Gargantuan",
        (Alignments, "no_alignment") => "No Alignment",
        (Alignments, "lawful_good") => "Lawful Good",
        (Alignments, "neutral_good") => "Neutral Good",
        (Alignments, "chaotic_good") => "Chaotic Good",
        (Alignments, "lawful_neutral") => "Lawful Neutral",
        (Alignments, "neutral") => "True Neutral",
        (Alignments, "chaotic_neutral") => "Chaotic Neutral",
        (Alignments, "lawful_evil") => "Lawful Evil",
        (Alignments, "neutral_evil") => "Neutral Evil",
        (Alignments, "chaotic_evil") => "Chaotic Evil",
        (DamageTypes, "bludgeoning") => "Bludgeoning (Non-Magical Weapons)",
        (DamageTypes, "piercing") => "Piercing (Non-Magical Weapons)",
        (DamageTypes, "slashing") => "Slashing (Non-Magical Weapons)",
        (DamageTypes, "fire") => "Fire",
        (DamageTypes, "poison") => "Poison",
        (DamageTypes, "cold") => "Cold",
        (DamageTypes, "necrotic") => "Necrotic",
        (DamageTypes, "radiant") => "Radiant",
        (DamageTypes, "acid") => "Acid",
        (DamageTypes, "force") => "Force",
        (DamageTypes, "lightning") => "Lightning",
        (DamageTypes, "psychic") => "Psychic",
        (DamageTypes, "thunder") => "Thunder",
        (DamageTypes, "silvered_weapons") => "Silvered Weapons",
        (DamageTypes, "adamantine_weapons") => "Adamantine Weapons",
        (DamageTypes, "magic_weapons") => "Magical Weapons",
        (Conditions, "blinded") => "Blinded",
        (Conditions, "charmed") => "Charmed",
        (Conditions, "deafened") => "Deafened",
        (Conditions, "exhausted") => "Exhausted",
        (Conditions, "frightened") => "Frightened",
        (Conditions, "grappled") => "Grappled",
        (Conditions, "incapacitated") => "Incapacitated",
        (Conditions, "invisible") => "Invisible",
        (Conditions, "mute") => "Mute",
        (Conditions, "paralyzed") => "Paralyzed",
        (Conditions, "petrified") => "Petrified",
        (Conditions, "poisoned") => "Poisoned",
        (Conditions, "prone") => "Prone",
        (Conditions, "restrained") => "Restrained",
        (Conditions, "stunned") => "Stunned",
        (Conditions, "unconscious") => "Unconscious",
        (SpellSchools, "abjuration") => "Abjuration",
        (SpellSchools, "conjuration") => "Conjuration",
        (SpellSchools, "divination") => "Divination",
        (SpellSchools, "enchantment") => "Enchantment",
        (SpellSchools, "evocation") => "Evocation",
        (SpellSchools, "illusion") => "Illusion",
        (SpellSchools, "necromancy") => "Necromancy",
        (SpellSchools, "transmutation") => "Transmutation",
        (SpellClasses, "bard") => "Bard",
        (SpellClasses, "cleric") => "Cleric",
        (SpellClasses, "druid") => "Druid",
        (SpellClasses, "paladin") => "Paladin",
        (SpellClasses, "ranger") => "Ranger",
        (SpellClasses, "sorcerer") => "Sorcerer",
        (SpellClasses, "warlock") => "Warlock",
        (SpellClasses, "wizard") => "Wizard",
        (SpellClasses, "artificer") => "Artificer",
        (ActionTypes, "action") => "Action",
        (ActionTypes, "bonus_action") => "Bonus action",
        (ActionTypes, "reaction") => "Reaction",
        (ActionTypes, "minute") => "Minute",
        (ActionTypes, "hour") => "Hour",
        (EncounterTypes, "combat") => "Combat",
        (EncounterTypes, "hazard") => "Hazard",
        (EncounterTypes, "chase") => "Chase",
        (EncounterTypes, "random") => "Random Events",
        _ => return None,
    })
}

fn game_label_ru(category: GameCategory, key: &str) -> Option<&'static str> {
    use GameCategory::*;
    Some(match (category, key) {
        (CreatureTypes, "aberration") => "Аберрация",
        (CreatureTypes, "beast") => "Зверь",
        (CreatureTypes, "celestial") => "Небожитель",
        (CreatureTypes, "construct") => "Конструкт",
        (CreatureTypes, "dragon") => "Дракон",
        (CreatureTypes, "elemental") => "Элементаль",
        (CreatureTypes, "fey") => "Фея",
        (CreatureTypes, "fiend") => "Исчадие",
        (CreatureTypes, "giant") => "Великан",
        (CreatureTypes, "humanoid") => "Гуманоид",
        (CreatureTypes, "monstrosity") => "Монстр",
        (CreatureTypes, "ooze") => "Слизь",
        (CreatureTypes, "plant") => "Растение",
        (CreatureTypes, "undead") => "Нежить",
        (Sizes, "tiny") => "Крошечный",
        (Sizes, "small") => "Малый",
        (Sizes, "medium") => "Средний",
        (Sizes, "large") => "Большой",
        (Sizes, "huge") => "Огромный",
        (Sizes, "gargantuan") => "Громадный",
        (Alignments, "no_alignment") => "Без мировоззрения",
        (Alignments, "lawful_good") => "Законно-Доброе",
        (Alignments, "neutral_good") => "Нейтрально-Доброе",
        (Alignments, "chaotic_good") => "Хаотично-Доброе",
        (Alignments, "lawful_neutral") => "Законно-Нейтральное",
        (Alignments, "neutral") => "Истинно-Нейтральное",
        (Alignments, "chaotic_neutral") => "Хаотично-Нейтральное",
        (Alignments, "lawful_evil") => "Законно-Злое",
        (Alignments, "neutral_evil") => "Нейтрально-Злое",
        (Alignments, "chaotic_evil") => "Хаотично-Злое",
        (DamageTypes, "bludgeoning") => "Дробящий от немагических атак",
        (DamageTypes, "piercing") => "Колющий от немагических атак",
        (DamageTypes, "slashing") => "Рубящий от немагических атак",
        (DamageTypes, "fire") => "Огонь",
        (DamageTypes, "poison") => "Яд",
        (DamageTypes, "cold") => "Холод",
        (DamageTypes, "necrotic") => "Некротическая энергия",
        (DamageTypes, "radiant") => "Излучение",
        (DamageTypes, "acid") => "Кислота",
        (DamageTypes, "force") => "Силовое поле",
        (DamageTypes, "lightning") => "Электричество",
        (DamageTypes, "psychic") => "Психическая энергия",
        (DamageTypes, "thunder") => "Гром (звук)",
        (DamageTypes, "silvered_weapons") => "Посеребреное оружие",
        (DamageTypes, "adamantine_weapons") => "Адамантиновое оружие",
        (DamageTypes, "magic_weapons") => "Магическое оружие",
        (Conditions, "blinded") => "Ослепленный",
        (Conditions, "charmed") => "Очарованный",
        (Conditions, "deafened") => "Оглохший",
        (Conditions, "exhausted") => "Истощенный",
        (Conditions, "frightened") => "Испуганный",
        (Conditions, "grappled") => "Схваченный",
        (Conditions, "incapacitated") => "Недееспособный",
        (Conditions, "invisible") => "Невидимый",
        (Conditions, "mute") => "Немой",
        (Conditions, "paralyzed") => "Парализованный",
        (Conditions, "petrified") => "Окаменевший",
        (Conditions, "poisoned") => "Отравленный",
        (Conditions, "prone") => "Сбитый с ног",
        (Conditions, "restrained") => "Опутанный",
        (Conditions, "stunned") => "Ошеломленный",
        (Conditions, "unconscious") => "Без сознания",
        (SpellSchools, "abjuration") => "Ограждение",
        (SpellSchools, "conjuration") => "Вызов",
        (SpellSchools, "divination") => "Прорицание",
        (SpellSchools, "enchantment") => "Очарование",
        (SpellSchools, "evocation") => "Воплощение",
        (SpellSchools, "illusion") => "Иллюзия",
        (SpellSchools, "necromancy") => "Некромантия",
        (SpellSchools, "transmutation") => "Преобразование",
        (SpellClasses, "bard") => "Бард",
        (SpellClasses, "cleric") => "Жрец",
        (SpellClasses, "druid") => "Друид",
        (SpellClasses, "paladin") => "Паладин",
        (SpellClasses, "ranger") => "Следопыт",
        (SpellClasses, "sorcerer") => "Чародей",
        (SpellClasses, "warlock") => "Колдун",
        (SpellClasses, "wizard") => "Волшебник",
        (SpellClasses, "artificer") => "Изобретатель",
        (ActionTypes, "action") => "Действие",
        (ActionTypes, "bonus_action") => "Бонусное действие",
        (ActionTypes, "reaction") => "Реакция",
        (ActionTypes, "minute") => "1 минута",
        (ActionTypes, "hour") => "1 час",
        (EncounterTypes, "combat") => "Сражение",
        (EncounterTypes, "hazard") => "Опасная область",
        (EncounterTypes, "chase") => "Погоня",
        (EncounterTypes, "random") => "Случайные события",
        _ => return None,
    })
}

/* ---------------- UI dictionary ---------------- */

fn ui_text(locale: Locale, key: &str) -> Option<&'static str> {
    match locale {
        Locale::En => ui_text_en(key),
        Locale::Ru => ui_text_ru(key),
    }
}

fn ui_text_en(key: &str) -> Option<&'static str> {
    Some(match key {
        "CREATURE_MODAL.TITLE" => "Add Creature to Bestiary",
        "CREATURE_MODAL.SAVE_BUTTON" => "Save",
        "CREATURE_MODAL.CANCEL_BUTTON" => "Cancel",
        "CREATURE_MODAL.SUCCESS" => "Creature \"{name}\" added to bestiary!",
        "CREATURE_MODAL.ERROR" => "Error saving creature: {message}",
        "CREATURE_MODAL.VALIDATION_NAME" => "Please enter creature name",
        "BESTIARY.TITLE" => "Bestiary",
        "BESTIARY.ADD_CREATURE" => "Add Creature",
        "BESTIARY.NO_CREATURES" => {
            "No creatures added yet. Click \"Add Creature\" to create the first one."
        }
        "BESTIARY.DELETE_SUCCESS" => "Creature \"{name}\" deleted",
        "BESTIARY.EDIT" => "Edit",
        "BESTIARY.DELETE" => "Delete",
        "SPELLS.TITLE" => "Spellbook",
        "SPELLS.ADD_SPELL" => "Add Spell",
        "SPELLS.NO_SPELLS" => "No spells added yet.",
        "SPELLS.NO_SPELLS_FOUND" => "No spells match the search.",
        "SPELLS.SEARCH_PLACEHOLDER" => "Search spells...",
        "SPELLS.SCHOOL_SECTIONS" => "By school",
        "SPELLS.DELETE_SUCCESS" => "Spell \"{name}\" deleted",
        "COMMON.SAVE" => "Save",
        "COMMON.CANCEL" => "Cancel",
        "COMMON.DELETE" => "Delete",
        "COMMON.EDIT" => "Edit",
        "COMMON.ADD" => "Add",
        "COMMON.CREATE" => "Create",
        "COMMON.UPDATE" => "Update",
        "COMMON.REMOVE" => "Remove",
        "COMMON.CONFIRM" => "Confirm",
        "COMMON.CLOSE" => "Close",
        "COMMON.YES" => "Yes",
        "COMMON.NO" => "No",
        "COMMON.OK" => "OK",
        _ => return None,
    })
}

fn ui_text_ru(key: &str) -> Option<&'static str> {
    Some(match key {
        "CREATURE_MODAL.TITLE" => "Добавить существо в бестиарий",
        "CREATURE_MODAL.SAVE_BUTTON" => "Сохранить",
        "CREATURE_MODAL.CANCEL_BUTTON" => "Отмена",
        "CREATURE_MODAL.SUCCESS" => "Существо \"{name}\" добавлено в бестиарий!",
        "CREATURE_MODAL.ERROR" => "Ошибка при сохранении существа: {message}",
        "CREATURE_MODAL.VALIDATION_NAME" => "Пожалуйста, введите имя существа",
        "BESTIARY.TITLE" => "Бестиарий",
        "BESTIARY.ADD_CREATURE" => "Добавить существо",
        "BESTIARY.NO_CREATURES" => {
            "Существа еще не добавлены. Нажмите \"Добавить существо\" чтобы создать первое."
        }
        "BESTIARY.DELETE_SUCCESS" => "Существо \"{name}\" удалено",
        "BESTIARY.EDIT" => "Редактировать",
        "BESTIARY.DELETE" => "Удалить",
        "SPELLS.TITLE" => "Книга заклинаний",
        "SPELLS.ADD_SPELL" => "Добавить заклинание",
        "SPELLS.NO_SPELLS" => "Заклинания еще не добавлены.",
        "SPELLS.NO_SPELLS_FOUND" => "Заклинания не найдены.",
        "SPELLS.SEARCH_PLACEHOLDER" => "Поиск заклинаний...",
        "SPELLS.SCHOOL_SECTIONS" => "По школам",
        "SPELLS.DELETE_SUCCESS" => "Заклинание \"{name}\" удалено",
        "COMMON.SAVE" => "Сохранить",
        "COMMON.CANCEL" => "Отмена",
        "COMMON.DELETE" => "Удалить",
        "COMMON.EDIT" => "Редактировать",
        "COMMON.ADD" => "Добавить",
        "COMMON.CREATE" => "Создать",
        "COMMON.UPDATE" => "Обновить",
        "COMMON.REMOVE" => "Удалить",
        "COMMON.CONFIRM" => "Подтвердить",
        "COMMON.CLOSE" => "Закрыть",
        "COMMON.YES" => "Да",
        "COMMON.NO" => "Нет",
        "COMMON.OK" => "ОК",
        _ => return None,
    })
}
