//! Built-in locale data for number and date formatting.
//!
//! A small table of symbols, patterns and calendar names for the locales
//! ficu ships with. [`locale_data`] walks the locale's fallback chain
//! (`de_AT` → `de` → root), so every locale resolves to some entry.

use ficu_common::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberSymbols {
    pub decimal: char,
    pub grouping: char,
    pub percent: char,
    pub per_mille: char,
    pub minus: char,
    pub infinity: &'static str,
    pub nan: &'static str,
    pub currency_symbol: &'static str,
    pub currency_code: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberPatterns {
    pub decimal: &'static str,
    pub currency: &'static str,
    pub percent: &'static str,
}

/// Calendar names. Weekdays start on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateNames {
    pub months_wide: [&'static str; 12],
    pub months_abbr: [&'static str; 12],
    pub weekdays_wide: [&'static str; 7],
    pub weekdays_abbr: [&'static str; 7],
    pub am_pm: [&'static str; 2],
    pub eras_abbr: [&'static str; 2],
    pub eras_wide: [&'static str; 2],
}

/// Date and time patterns indexed full, long, medium, short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePatterns {
    pub date: [&'static str; 4],
    pub time: [&'static str; 4],
    /// `{1}` is the date, `{0}` the time.
    pub date_time: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct LocaleData {
    pub id: &'static str,
    pub symbols: NumberSymbols,
    pub number_patterns: NumberPatterns,
    pub names: &'static DateNames,
    pub date_patterns: DatePatterns,
}

/// The entry for `locale` or its nearest ancestor.
#[must_use]
pub fn locale_data(locale: &Locale) -> &'static LocaleData {
    for candidate in locale.fallback_chain() {
        let id = candidate.to_string();
        if let Some(data) = ALL.iter().find(|d| d.id == id) {
            return data;
        }
    }
    &ROOT
}

const LATIN_SYMBOLS: NumberSymbols = NumberSymbols {
    decimal: '.',
    grouping: ',',
    percent: '%',
    per_mille: '‰',
    minus: '-',
    infinity: "∞",
    nan: "NaN",
    currency_symbol: "¤",
    currency_code: "XXX",
};

const EURO_COMMA: NumberSymbols = NumberSymbols {
    decimal: ',',
    grouping: '.',
    currency_symbol: "€",
    currency_code: "EUR",
    ..LATIN_SYMBOLS
};

const TIME_24H: [&str; 4] = ["HH:mm:ss zzzz", "HH:mm:ss z", "HH:mm:ss", "HH:mm"];

const EN_NAMES: DateNames = DateNames {
    months_wide: [
        "January", "February", "March", "April", "May", "June", "July", "August",
        "September", "October", "November", "December",
    ],
    months_abbr: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    weekdays_wide: [
        "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
    ],
    weekdays_abbr: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    am_pm: ["AM", "PM"],
    eras_abbr: ["BC", "AD"],
    eras_wide: ["Before Christ", "Anno Domini"],
};

const DE_NAMES: DateNames = DateNames {
    months_wide: [
        "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August",
        "September", "Oktober", "November", "Dezember",
    ],
    months_abbr: [
        "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
    ],
    weekdays_wide: [
        "Sonntag", "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag",
    ],
    weekdays_abbr: ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
    am_pm: ["vorm.", "nachm."],
    eras_abbr: ["v. Chr.", "n. Chr."],
    eras_wide: ["v. Chr.", "n. Chr."],
};

const FR_NAMES: DateNames = DateNames {
    months_wide: [
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août",
        "septembre", "octobre", "novembre", "décembre",
    ],
    months_abbr: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
        "nov.", "déc.",
    ],
    weekdays_wide: [
        "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
    ],
    weekdays_abbr: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
    am_pm: ["AM", "PM"],
    eras_abbr: ["av. J.-C.", "ap. J.-C."],
    eras_wide: ["avant Jésus-Christ", "après Jésus-Christ"],
};

const ES_NAMES: DateNames = DateNames {
    months_wide: [
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto",
        "septiembre", "octubre", "noviembre", "diciembre",
    ],
    months_abbr: [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
    ],
    weekdays_wide: [
        "domingo", "lunes", "martes", "miércoles", "jueves", "viernes", "sábado",
    ],
    weekdays_abbr: ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"],
    am_pm: ["a.m.", "p.m."],
    eras_abbr: ["a.C.", "d.C."],
    eras_wide: ["antes de Cristo", "anno Dómini"],
};

const IT_NAMES: DateNames = DateNames {
    months_wide: [
        "gennaio", "febbraio", "marzo", "aprile", "maggio", "giugno", "luglio", "agosto",
        "settembre", "ottobre", "novembre", "dicembre",
    ],
    months_abbr: [
        "gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic",
    ],
    weekdays_wide: [
        "domenica", "lunedì", "martedì", "mercoledì", "giovedì", "venerdì", "sabato",
    ],
    weekdays_abbr: ["dom", "lun", "mar", "mer", "gio", "ven", "sab"],
    am_pm: ["m.", "p."],
    eras_abbr: ["aC", "dC"],
    eras_wide: ["a.C.", "d.C."],
};

const JA_NAMES: DateNames = DateNames {
    months_wide: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    months_abbr: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    weekdays_wide: [
        "日曜日", "月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日",
    ],
    weekdays_abbr: ["日", "月", "火", "水", "木", "金", "土"],
    am_pm: ["午前", "午後"],
    eras_abbr: ["紀元前", "西暦"],
    eras_wide: ["紀元前", "西暦"],
};

const RU_NAMES: DateNames = DateNames {
    months_wide: [
        "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа",
        "сентября", "октября", "ноября", "декабря",
    ],
    months_abbr: [
        "янв.", "февр.", "марта", "апр.", "мая", "июня", "июля", "авг.", "сент.", "окт.",
        "нояб.", "дек.",
    ],
    weekdays_wide: [
        "воскресенье", "понедельник", "вторник", "среда", "четверг", "пятница", "суббота",
    ],
    weekdays_abbr: ["Вс", "Пн", "Вт", "Ср", "Чт", "Пт", "Сб"],
    am_pm: ["ДП", "ПП"],
    eras_abbr: ["до н.э.", "н.э."],
    eras_wide: ["до н.э.", "н.э."],
};

static ROOT: LocaleData = LocaleData {
    id: "",
    symbols: LATIN_SYMBOLS,
    number_patterns: NumberPatterns {
        decimal: "#,##0.###",
        currency: "¤ #,##0.00",
        percent: "#,##0%",
    },
    names: &EN_NAMES,
    date_patterns: DatePatterns {
        date: ["EEEE, y MMMM dd", "y MMMM d", "y MMM d", "yyyy-MM-dd"],
        time: TIME_24H,
        date_time: "{1} {0}",
    },
};

static EN: LocaleData = LocaleData {
    id: "en",
    symbols: NumberSymbols {
        currency_symbol: "$",
        currency_code: "USD",
        ..LATIN_SYMBOLS
    },
    number_patterns: NumberPatterns {
        decimal: "#,##0.###",
        currency: "¤#,##0.00;(¤#,##0.00)",
        percent: "#,##0%",
    },
    names: &EN_NAMES,
    date_patterns: DatePatterns {
        date: ["EEEE, MMMM d, y", "MMMM d, y", "MMM d, y", "M/d/yy"],
        time: ["h:mm:ss a zzzz", "h:mm:ss a z", "h:mm:ss a", "h:mm a"],
        date_time: "{1} {0}",
    },
};

static EN_GB: LocaleData = LocaleData {
    id: "en_GB",
    symbols: NumberSymbols {
        currency_symbol: "£",
        currency_code: "GBP",
        ..LATIN_SYMBOLS
    },
    number_patterns: NumberPatterns {
        decimal: "#,##0.###",
        currency: "¤#,##0.00",
        percent: "#,##0%",
    },
    names: &EN_NAMES,
    date_patterns: DatePatterns {
        date: ["EEEE, d MMMM y", "d MMMM y", "d MMM y", "dd/MM/yyyy"],
        time: TIME_24H,
        date_time: "{1} {0}",
    },
};

static DE: LocaleData = LocaleData {
    id: "de",
    symbols: EURO_COMMA,
    number_patterns: NumberPatterns {
        decimal: "#,##0.###",
        currency: "#,##0.00 ¤",
        percent: "#,##0 %",
    },
    names: &DE_NAMES,
    date_patterns: DatePatterns {
        date: ["EEEE, d. MMMM y", "d. MMMM y", "dd.MM.yyyy", "dd.MM.yy"],
        time: TIME_24H,
        date_time: "{1} {0}",
    },
};

static FR: LocaleData = LocaleData {
    id: "fr",
    symbols: NumberSymbols {
        grouping: '\u{a0}',
        ..EURO_COMMA
    },
    number_patterns: NumberPatterns {
        decimal: "#,##0.###",
        currency: "#,##0.00 ¤",
        percent: "#,##0 %",
    },
    names: &FR_NAMES,
    date_patterns: DatePatterns {
        date: ["EEEE d MMMM y", "d MMMM y", "d MMM y", "dd/MM/yy"],
        time: TIME_24H,
        date_time: "{1} {0}",
    },
};

static ES: LocaleData = LocaleData {
    id: "es",
    symbols: EURO_COMMA,
    number_patterns: NumberPatterns {
        decimal: "#,##0.###",
        currency: "#,##0.00 ¤",
        percent: "#,##0%",
    },
    names: &ES_NAMES,
    date_patterns: DatePatterns {
        date: [
            "EEEE d 'de' MMMM 'de' y",
            "d 'de' MMMM 'de' y",
            "dd/MM/yyyy",
            "dd/MM/yy",
        ],
        time: TIME_24H,
        date_time: "{1} {0}",
    },
};

static IT: LocaleData = LocaleData {
    id: "it",
    symbols: EURO_COMMA,
    number_patterns: NumberPatterns {
        decimal: "#,##0.###",
        currency: "¤ #,##0.00",
        percent: "#,##0%",
    },
    names: &IT_NAMES,
    date_patterns: DatePatterns {
        date: ["EEEE d MMMM y", "dd MMMM y", "dd/MMM/y", "dd/MM/yy"],
        time: TIME_24H,
        date_time: "{1} {0}",
    },
};

static JA: LocaleData = LocaleData {
    id: "ja",
    symbols: NumberSymbols {
        currency_symbol: "￥",
        currency_code: "JPY",
        ..LATIN_SYMBOLS
    },
    number_patterns: NumberPatterns {
        decimal: "#,##0.###",
        currency: "¤#,##0",
        percent: "#,##0%",
    },
    names: &JA_NAMES,
    date_patterns: DatePatterns {
        date: ["y年M月d日EEEE", "y年M月d日", "yyyy/MM/dd", "yy/MM/dd"],
        time: ["H時mm分ss秒 zzzz", "H:mm:ss z", "H:mm:ss", "H:mm"],
        date_time: "{1} {0}",
    },
};

static RU: LocaleData = LocaleData {
    id: "ru",
    symbols: NumberSymbols {
        decimal: ',',
        grouping: '\u{a0}',
        currency_symbol: "руб.",
        currency_code: "RUB",
        ..LATIN_SYMBOLS
    },
    number_patterns: NumberPatterns {
        decimal: "#,##0.###",
        currency: "#,##0.00 ¤",
        percent: "#,##0 %",
    },
    names: &RU_NAMES,
    date_patterns: DatePatterns {
        date: [
            "EEEE, d MMMM y 'г'.",
            "d MMMM y 'г'.",
            "dd.MM.yyyy",
            "dd.MM.yy",
        ],
        time: ["H:mm:ss zzzz", "H:mm:ss z", "H:mm:ss", "H:mm"],
        date_time: "{1} {0}",
    },
};

static ALL: [&LocaleData; 9] = [&EN, &EN_GB, &DE, &FR, &ES, &IT, &JA, &RU, &ROOT];

#[cfg(test)]
mod tests {
    use super::*;

    fn data(id: &str) -> &'static LocaleData {
        locale_data(&Locale::new(id).unwrap())
    }

    #[test]
    fn exact_and_fallback_lookup() {
        assert_eq!(data("en_GB").id, "en_GB");
        assert_eq!(data("en_US").id, "en");
        assert_eq!(data("en_US_POSIX").id, "en");
        assert_eq!(data("de_AT").id, "de");
        assert_eq!(data("sw_KE").id, "");
        assert_eq!(data("").id, "");
    }

    #[test]
    fn symbols_differ_by_locale() {
        assert_eq!(data("en").symbols.grouping, ',');
        assert_eq!(data("de").symbols.grouping, '.');
        assert_eq!(data("fr").symbols.grouping, '\u{a0}');
        assert_eq!(data("fr").symbols.decimal, ',');
        assert_eq!(data("ja").symbols.currency_code, "JPY");
    }

    #[test]
    fn every_locale_has_a_date_time_glue_pattern() {
        for entry in ALL {
            assert!(entry.date_patterns.date_time.contains("{0}"), "{}", entry.id);
            assert!(entry.date_patterns.date_time.contains("{1}"), "{}", entry.id);
        }
    }
}
