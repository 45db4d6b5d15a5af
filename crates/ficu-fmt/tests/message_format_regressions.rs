//! Long-standing message formatting cases: quoting quirks, nested choice
//! texts, parsing back formatted output and error reporting.

use ficu_common::{ErrorCode, Locale};
use ficu_fmt::{
    ChoiceFormat, Formattable, MessageFormat, MessageFormatOptions, PluralFormat, SelectFormat,
};
use pretty_assertions::assert_eq;

fn en(pattern: &str) -> MessageFormat {
    MessageFormat::with_options(pattern, &Locale::us(), MessageFormatOptions::default()).unwrap()
}

#[test]
fn file_count_choice() {
    let m = en("{0,choice,0#no files|1#one file|1< {0,number,integer} files}");
    for (n, expected) in [(0, "no files"), (1, "one file"), (12373, "12,373 files")] {
        assert_eq!(m.format(&[Formattable::Long(n)]).unwrap(), expected);
    }
}

#[test]
fn disk_message_with_two_arguments() {
    let m = en(concat!(
        "The disk \"{1}\" contains ",
        "{0,choice,0#no files|1#one file|1< {0,number,integer} files}.",
    ));
    let out = m
        .format(&[Formattable::Long(12373), Formattable::from("MyDisk")])
        .unwrap();
    assert_eq!(out, "The disk \"MyDisk\" contains 12,373 files.");
    let out = m
        .format(&[Formattable::Long(1), Formattable::from("MyDisk")])
        .unwrap();
    assert_eq!(out, "The disk \"MyDisk\" contains one file.");
}

#[test]
fn quoted_apostrophes_inside_choice_texts() {
    let m = en(
        "''Vous'' {0,choice,0#n''|1#}avez s\u{e9}lectionn\u{e9} {0,choice,0#aucun|1#{0}} \
         client{0,choice,0#s|1#|2#s} personnel{0,choice,0#s|1#|2#s}.",
    );
    let expected = [
        "'Vous' n'avez s\u{e9}lectionn\u{e9} aucun clients personnels.",
        "'Vous' avez s\u{e9}lectionn\u{e9} 1 client personnel.",
        "'Vous' avez s\u{e9}lectionn\u{e9} 2 clients personnels.",
    ];
    for (n, expected) in (0..).zip(expected) {
        assert_eq!(m.format(&[Formattable::Long(n)]).unwrap(), expected);
    }
}

#[test]
fn triple_apostrophes() {
    let m = en("'''{'0}'' '''{0}'''");
    assert_eq!(m.format(&[Formattable::from("abc")]).unwrap(), "'{0}' '{0}'");
}

#[test]
fn quoted_braces_round_trip() {
    let m = en("'{'{0}'}' and '{1}'");
    assert_eq!(m.format(&["x".into()]).unwrap(), "{x} and {1}");
    assert_eq!(en(&m.to_pattern()), m);
}

#[test]
fn choice_pattern_round_trips() {
    for pattern in [
        "-∞<are negative|0<are no or fraction|1#is one|1<is 1+|∞<are many.",
        "0#are no files|1#is one file|1<are many files",
    ] {
        assert_eq!(ChoiceFormat::new(pattern).unwrap().to_pattern(), pattern);
    }
    let m = en("{0,choice,-∞<are negative|0<are no or fraction|1#is one|1<is 1+|∞<are many.}");
    assert_eq!(
        m.to_pattern(),
        "{0,choice,-∞<are negative|0<are no or fraction|1#is one|1<is 1+|∞<are many.}"
    );
}

#[test]
fn parse_back_string_arguments() {
    let m = en("Impossible {1} has occurred -- status code is {0} and message is {2}.");
    let args = [Formattable::Long(7), "Disk".into(), "Full".into()];
    let text = m.format(&args).unwrap();
    assert_eq!(text, "Impossible Disk has occurred -- status code is 7 and message is Full.");
    assert_eq!(
        m.parse(&text).unwrap(),
        vec![Formattable::from("7"), "Disk".into(), "Full".into()]
    );
}

#[test]
fn parse_mismatch_reports_position() {
    let m = en("There are {0} apples growing on the {1} tree.");
    assert_eq!(
        m.parse("There are 3 apples growing on the peach tree.").unwrap(),
        vec![Formattable::from("3"), Formattable::from("peach")]
    );

    let mut pos = 0;
    let err = m
        .parse_at("There is one apple growing on the peach tree.", &mut pos)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::MessageParseError);
    assert_eq!(err.offset(), Some(0));
    assert_eq!(pos, 0);
}

#[test]
fn parse_choice_and_number() {
    let m = en("{0,choice,1#YES|2#NO} and {1,number}");
    assert_eq!(
        m.parse("NO and 3.5").unwrap(),
        vec![Formattable::Double(2.0), Formattable::Double(3.5)]
    );
}

#[test]
fn dates_in_messages() {
    let m = en("On {0,date,yyyy-MM-dd} at {0,time,HH:mm} ({0,date,full})");
    assert_eq!(
        m.format(&[Formattable::Date(1e12)]).unwrap(),
        "On 2001-09-09 at 01:46 (Sunday, September 9, 2001)"
    );
}

#[test]
fn named_arguments_with_select_and_plural() {
    let m = en(concat!(
        "{host} {gender,select,",
        "female{invites {guests,plural,offset:1 =0{nobody} =1{{guest}} ",
        "one{{guest} and one other} other{{guest} and # others}} to her party} ",
        "other{invites {guests,plural,=0{nobody} other{# people}} to a party}}.",
    ));
    let args = |gender: &str, guests: i32| {
        vec![
            ("host", Formattable::from("Ann")),
            ("gender", Formattable::from(gender)),
            ("guests", Formattable::Long(guests)),
            ("guest", Formattable::from("Bo")),
        ]
    };
    assert_eq!(m.format_named(&args("female", 0)).unwrap(), "Ann invites nobody to her party.");
    assert_eq!(m.format_named(&args("female", 1)).unwrap(), "Ann invites Bo to her party.");
    assert_eq!(
        m.format_named(&args("female", 2)).unwrap(),
        "Ann invites Bo and one other to her party."
    );
    assert_eq!(
        m.format_named(&args("female", 5)).unwrap(),
        "Ann invites Bo and 4 others to her party."
    );
    assert_eq!(m.format_named(&args("male", 3)).unwrap(), "Ann invites 3 people to a party.");
}

#[test]
fn duplicate_select_keyword() {
    let err = SelectFormat::new("odd{foo} odd{bar} other{foobar}").unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicateKeyword);
}

#[test]
fn plural_errors_surface_through_messages() {
    let err = MessageFormat::with_locale("{0,plural,one{a}}", &Locale::us()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::DefaultKeywordMissing);
    let err = PluralFormat::new("few{a} other{b}", &Locale::us()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UndefinedKeyword);
}

#[test]
fn argument_type_mismatches() {
    let m = en("{0,number}");
    let err = m.format(&[Formattable::from("nope")]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::IllegalArgumentError);

    let m = en("{0,select,other{x}}");
    let err = m.format(&[Formattable::Long(1)]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::IllegalArgumentError);
}

#[test]
fn static_format_pattern() {
    let out = MessageFormat::format_pattern("{0} + {1}", &["a".into(), "b".into()]).unwrap();
    assert_eq!(out, "a + b");
}
