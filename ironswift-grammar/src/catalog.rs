/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Built-in field grammars.
//!
//! One entry per supported tag. Every layout the codec knows is represented,
//! plus `94T`, whose pattern shape the codec deliberately rejects.

use crate::schema::{FieldGrammar, SemanticType};
use ironswift_core::error::ConfigError;

use SemanticType::{Bic, Country, Currency, Date2, Date4, Decimal, Integer, RateNumber, Text, Time};

/// Builds every grammar of the built-in catalog.
///
/// # Errors
/// Returns the first `ConfigError` raised by an inconsistent entry.
pub fn standard_grammars() -> Result<Vec<FieldGrammar>, ConfigError> {
    let mut grammars = Vec::with_capacity(40);

    // single component
    for (tag, pattern, validator, kind, label) in [
        ("12", "N", "3!n", Integer, "Type"),
        ("20", "S", "16x", Text, "Reference"),
        ("21", "S", "16x", Text, "Reference"),
        ("23B", "S", "4!c", Text, "Type"),
        ("25", "S", "35x", Text, "Account"),
        ("26T", "S", "3!c", Text, "Type"),
        ("30", "<DATE2>", "<DATE2>", Date2, "Date"),
        ("36", "N", "12d", RateNumber, "Rate"),
        ("71A", "S", "3!a", Text, "Code"),
    ] {
        grammars.push(
            FieldGrammar::builder(tag, pattern)
                .validator(validator)
                .component(kind, label)
                .build()?,
        );
    }

    // delimited
    grammars.push(
        FieldGrammar::builder("23E", "S[/S]")
            .validator("4!c[/30x]")
            .component(Text, "Instruction Code")
            .component(Text, "Additional Information")
            .build()?,
    );
    grammars.push(
        FieldGrammar::builder("28C", "N[/N]")
            .validator("5n[/5n]")
            .component(Integer, "Statement Number")
            .component(Integer, "Sequence Number")
            .build()?,
    );
    grammars.push(
        FieldGrammar::builder("31F", "<DATE2>[/<DATE2>][//35x]")
            .component(Date2, "Date")
            .component(Date2, "Period Date")
            .component(Text, "Period Details")
            .alias("Details")
            .build()?,
    );

    // fixed width
    grammars.push(
        FieldGrammar::builder("32A", "<DATE2><CUR><AMOUNT>")
            .validator("6!n3!a15d")
            .component(Date2, "Date")
            .component(Currency, "Currency")
            .component(Decimal, "Amount")
            .build()?,
    );
    for tag in ["32B", "33B", "71F"] {
        grammars.push(
            FieldGrammar::builder(tag, "<CUR><AMOUNT>")
                .validator("3!a15d")
                .component(Currency, "Currency")
                .component(Decimal, "Amount")
                .build()?,
        );
    }
    for tag in ["60F", "62F", "64"] {
        grammars.push(
            FieldGrammar::builder(tag, "<DC><DATE2><CUR><AMOUNT>")
                .validator("1!a6!n3!a15d")
                .component(Text, "DC Mark")
                .alias("Debit Credit Mark")
                .component(Date2, "Date")
                .component(Currency, "Currency")
                .component(Decimal, "Amount")
                .build()?,
        );
    }
    grammars.push(
        FieldGrammar::builder("13E", "<DATE4><HHMM>")
            .validator("8!n4!n")
            .component(Date4, "Date")
            .component(Time, "Time")
            .build()?,
    );
    grammars.push(
        FieldGrammar::builder("336", "6!S5!NS")
            .component(Text, "Identifier")
            .component(Integer, "Session Number")
            .component(Text, "Narrative")
            .build()?,
    );

    // alpha / numeric split
    for tag in ["133", "137"] {
        grammars.push(
            FieldGrammar::builder(tag, "c3!S<CC>N")
                .component(Text, "Indicator")
                .component(Text, "Code")
                .component(Currency, "Currency")
                .component(Integer, "Number")
                .build()?,
        );
    }

    // narrative
    for (tag, pattern, validator) in [
        ("70", "35x[$35x]0-3", "4*35x"),
        ("72", "35x[$35x]0-5", "6*35x"),
        ("75", "35x[$35x]0-5", "6*35x"),
        ("76", "35x[$35x]0-5", "6*35x"),
        ("79", "50x[$50x]0-34", "35*50x"),
        ("86", "65x[$65x]0-5", "6*65x"),
    ] {
        grammars.push(narrative(tag, pattern, validator, "Narrative")?);
    }
    grammars.push(narrative(
        "50H",
        "/34x$35x[$35x]0-3",
        "/34x$4*35x",
        "Name And Address",
    )?);

    // generic qualifier fields
    grammars.push(
        FieldGrammar::builder("20C", ":4!c//16x")
            .component(Text, "Qualifier")
            .component(Text, "Reference")
            .build()?,
    );
    grammars.push(
        FieldGrammar::builder("22F", ":4!c/[8c]/4!c")
            .component(Text, "Qualifier")
            .component(Text, "Data Source Scheme")
            .alias("DSS")
            .component(Text, "Indicator")
            .build()?,
    );
    grammars.push(
        FieldGrammar::builder("95C", ":4!c//<CC>")
            .validator(":4!c//2!a")
            .component(Text, "Qualifier")
            .component(Country, "Country Code")
            .build()?,
    );
    grammars.push(
        FieldGrammar::builder("95P", ":4!c//<BIC>")
            .validator(":4!c//4!a2!a2!c[3!c]")
            .component(Text, "Qualifier")
            .component(Bic, "BIC")
            .alias("Identifier Code")
            .build()?,
    );
    grammars.push(
        FieldGrammar::builder("95S", ":4!c/[8c]/4!c/<CC>/30x")
            .validator(":4!c/[8c]/4!c/2!a/30x")
            .component(Text, "Qualifier")
            .component(Text, "Data Source Scheme")
            .alias("DSS")
            .component(Text, "Type Of ID")
            .component(Country, "Country Code")
            .component(Text, "Alternate ID")
            .build()?,
    );
    grammars.push(
        FieldGrammar::builder("98A", ":4!c//<DATE4>")
            .validator(":4!c//8!n")
            .component(Text, "Qualifier")
            .component(Date4, "Date")
            .build()?,
    );

    // qualifier plus adjacent fixed-width tokens: not implemented
    grammars.push(
        FieldGrammar::builder("94T", ":S//9!SS")
            .validator(":4!c//3!a")
            .component(Text, "Qualifier")
            .component(Text, "Type")
            .component(Text, "Information")
            .build()?,
    );

    Ok(grammars)
}

/// Builds a line-per-component grammar.
///
/// For a prefixed pattern the first component is `Account` and the lines
/// after it are labelled `<line_label>`, `<line_label> 2`, and so on.
fn narrative(
    tag: &str,
    pattern: &str,
    validator: &str,
    line_label: &str,
) -> Result<FieldGrammar, ConfigError> {
    let slots = crate::pattern::ParserPattern::parse(pattern)?.slots().len();
    let mut builder = FieldGrammar::builder(tag, pattern).validator(validator);
    let mut lines = slots;
    if pattern.starts_with('/') {
        builder = builder.component(Text, "Account");
        lines -= 1;
    }
    for line in 1..=lines {
        let label = if line == 1 {
            line_label.to_string()
        } else {
            format!("{line_label} {line}")
        };
        builder = builder.component(Text, label);
    }
    builder.build()
}
