use rust_decimal::Decimal;
use serde::Serialize;

use super::layout::*;
use crate::core::{BillingRecord, Diagnostic, Diagnostics, LanguageTag, Party, TracingDiagnostics};
use crate::i18n::{Localizer, Resolver, TranslationSource};
use crate::template::{
    HEADER_TEMPLATE, HeaderFields, PARTY_TEMPLATE, PAYMENT_TEMPLATE, PaymentFields,
    TemplateExpander, title_case,
};

/// Grid span of each party column and of the gap between them.
const PARTY_SPAN: u8 = 4;

#[derive(Debug, Clone, Copy)]
struct Templates {
    header: &'static str,
    party: &'static str,
    payment: &'static str,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            header: HEADER_TEMPLATE,
            party: PARTY_TEMPLATE,
            payment: PAYMENT_TEMPLATE,
        }
    }
}

/// Turns a [`BillingRecord`] into an ordered list of [`LayoutBlock`]s.
///
/// The output is always, in order: title, header, rule, parties, rule,
/// line-item table, payment heading, payment details. Composition never
/// fails. Missing labels become `[missing translation "<key>"]` and a
/// failing block template becomes empty text, each with a report to the
/// injected [`Diagnostics`].
///
/// `no_tax` only hides the tax column. Every amount, and therefore the
/// total, still includes tax.
pub struct InvoiceComposer<'a> {
    source: &'a dyn TranslationSource,
    diagnostics: &'a dyn Diagnostics,
    templates: Templates,
}

impl<'a> InvoiceComposer<'a> {
    pub fn new(source: &'a dyn TranslationSource, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            source,
            diagnostics,
            templates: Templates::default(),
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(number = %record.number, %language))]
    pub fn compose(&self, record: &BillingRecord, language: &LanguageTag) -> Vec<LayoutBlock> {
        let localizer = Localizer::new(
            Resolver::new(self.source, self.diagnostics),
            language.clone(),
        );
        let expander = TemplateExpander::new(&localizer);

        let mut blocks = Vec::with_capacity(8);
        blocks.push(LayoutBlock::Title(Text::title(
            localizer.t("invoice").to_uppercase(),
        )));

        let header = self.expand_or_empty(
            &expander,
            "header",
            self.templates.header,
            &HeaderFields::new(record),
        );
        blocks.push(LayoutBlock::Paragraph(
            Text::heading(header).aligned(Align::Right),
        ));
        blocks.push(LayoutBlock::Rule);

        blocks.push(LayoutBlock::Columns(vec![
            self.party_column(&localizer, &expander, "billTo", &record.bill_to),
            Column::spacer(PARTY_SPAN),
            self.party_column(&localizer, &expander, "seller", &record.company),
        ]));
        blocks.push(LayoutBlock::Rule);

        blocks.push(LayoutBlock::Table(self.items_table(record, &localizer)));

        blocks.push(LayoutBlock::Paragraph(Text::heading(
            localizer.t("payment").to_uppercase(),
        )));
        let payment = self.expand_or_empty(
            &expander,
            "payment",
            self.templates.payment,
            &PaymentFields::new(&record.payment),
        );
        blocks.push(LayoutBlock::Paragraph(Text::body(payment)));

        tracing::debug!(blocks = blocks.len(), items = record.items.len(), "invoice composed");
        blocks
    }

    fn party_column(
        &self,
        localizer: &Localizer<'_>,
        expander: &TemplateExpander<'_>,
        label_key: &str,
        party: &Party,
    ) -> Column {
        let label = title_case(&format!("{}:", localizer.t(label_key)));
        let details = self.expand_or_empty(expander, "party", self.templates.party, party);
        Column::new(PARTY_SPAN, vec![Text::heading(label), Text::body(details)])
    }

    fn items_table(&self, record: &BillingRecord, localizer: &Localizer<'_>) -> Table {
        let mask = ColumnMask::for_record(record.no_tax);
        let header = vec![
            Cell::new(TableColumn::Name, title_case(&localizer.t("name"))),
            Cell::new(TableColumn::Tax, title_case(&localizer.t("tax"))),
            Cell::new(TableColumn::Amount, title_case(&localizer.t("amount"))),
        ];

        // `None` once any amount has overflowed.
        let mut total = Some(Decimal::ZERO);
        let mut rows = Vec::with_capacity(record.items.len() + 1);
        for item in &record.items {
            let name = item.localized_name(localizer.language());
            let amount = item.final_amount();
            total = total.zip(amount).and_then(|(sum, amount)| sum.checked_add(amount));
            rows.push(vec![
                Cell::new(TableColumn::Name, name),
                Cell::new(TableColumn::Tax, item.tax.to_string()),
                Cell::new(TableColumn::Amount, self.amount_text(record, amount, name)),
            ]);
        }
        let total_label = localizer.t("total").to_uppercase();
        let total_text = self.amount_text(record, total, &total_label);
        rows.push(vec![
            Cell::new(TableColumn::Name, total_label),
            Cell::new(TableColumn::Tax, ""),
            Cell::new(TableColumn::Amount, total_text),
        ]);

        Table::new(&mask, header, rows).emphasize_last_row()
    }

    fn amount_text(&self, record: &BillingRecord, amount: Option<Decimal>, row: &str) -> String {
        match amount {
            Some(amount) => record.amount(amount).to_string(),
            None => {
                self.diagnostics.report(Diagnostic::AmountOutOfRange {
                    row: row.to_string(),
                });
                String::new()
            }
        }
    }

    fn expand_or_empty<T: Serialize>(
        &self,
        expander: &TemplateExpander<'_>,
        block: &'static str,
        template: &str,
        data: &T,
    ) -> String {
        expander.expand(template, data).unwrap_or_else(|e| {
            self.diagnostics.report(Diagnostic::TemplateFailed {
                block,
                reason: e.to_string(),
            });
            String::new()
        })
    }
}

/// Compose with diagnostics forwarded to `tracing`.
pub fn compose(
    record: &BillingRecord,
    source: &dyn TranslationSource,
    language: &LanguageTag,
) -> Vec<LayoutBlock> {
    InvoiceComposer::new(source, &TracingDiagnostics).compose(record, language)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::core::*;
    use crate::i18n::Catalog;

    fn record() -> BillingRecord {
        let date = NaiveDate::from_ymd_opt(2020, 11, 1).unwrap();
        BillingRecordBuilder::new("01/11/2020", date)
            .currency("PLN")
            .seller(PartyBuilder::new("John Snow Co.").build())
            .buyer(PartyBuilder::new("Lannister Ltd.").build())
            .add_item(LineItemBuilder::new("Tech support", dec!(5000)).build())
            .payment(PaymentInfo::new("PL 00 1234", date))
            .build()
            .unwrap()
    }

    #[test]
    fn broken_template_degrades_to_empty_text() {
        let catalog = Catalog::builtin();
        let diagnostics = CollectingDiagnostics::new();
        let mut composer = InvoiceComposer::new(&catalog, &diagnostics);
        composer.templates.header = "{{title (t \"date\")}}: {{missing_field}}";
        composer.templates.payment = "{{#each}}";

        let blocks = composer.compose(&record(), &"en".into());

        assert_eq!(blocks.len(), 8);
        assert_eq!(
            blocks[1],
            LayoutBlock::Paragraph(Text::heading("").aligned(Align::Right))
        );
        assert_eq!(blocks[7], LayoutBlock::Paragraph(Text::body("")));

        let failed: Vec<_> = diagnostics
            .entries()
            .into_iter()
            .filter_map(|d| match d {
                Diagnostic::TemplateFailed { block, .. } => Some(block),
                _ => None,
            })
            .collect();
        assert_eq!(failed, vec!["header", "payment"]);
    }

    #[test]
    fn broken_party_template_keeps_labels() {
        let catalog = Catalog::builtin();
        let diagnostics = CollectingDiagnostics::new();
        let mut composer = InvoiceComposer::new(&catalog, &diagnostics);
        composer.templates.party = "{{nope}}";

        let blocks = composer.compose(&record(), &"en".into());
        let LayoutBlock::Columns(columns) = &blocks[3] else {
            panic!("expected parties at index 3, got {:?}", blocks[3]);
        };
        assert_eq!(columns[0].content[0], Text::heading("Bill To:"));
        assert_eq!(columns[0].content[1], Text::body(""));
        assert_eq!(columns[2].content[0], Text::heading("Seller:"));
        assert_eq!(diagnostics.entries().len(), 2);
    }

    #[test]
    fn empty_record_still_has_total_row() {
        let catalog = Catalog::builtin();
        let mut record = record();
        record.items.clear();

        let blocks = compose(&record, &catalog, &"en".into());
        let LayoutBlock::Table(table) = &blocks[5] else {
            panic!("expected table at index 5");
        };
        assert_eq!(table.rows, vec![vec!["TOTAL", "", "0.00 PLN"]]);
    }

    #[test]
    fn overflowing_amounts_leave_cells_empty() {
        let catalog = Catalog::builtin();
        let diagnostics = CollectingDiagnostics::new();
        let mut record = record();
        let huge = LineItemBuilder::new("Huge", dec!(50000000000000000000000000000)).build();
        record.items = vec![huge.clone(), huge];
        record.items[1].tax = TaxRate::new(dec!(0.6));

        let blocks = InvoiceComposer::new(&catalog, &diagnostics).compose(&record, &"en".into());
        let LayoutBlock::Table(table) = &blocks[5] else {
            panic!("expected table at index 5");
        };
        assert_eq!(table.rows[0], vec!["Huge", "0%", "50000000000000000000000000000.00 PLN"]);
        assert_eq!(table.rows[1], vec!["Huge", "60%", ""]);
        assert_eq!(table.rows[2], vec!["TOTAL", "", ""]);
        assert_eq!(
            diagnostics.entries(),
            vec![
                Diagnostic::AmountOutOfRange { row: "Huge".into() },
                Diagnostic::AmountOutOfRange { row: "TOTAL".into() },
            ]
        );
    }
}
