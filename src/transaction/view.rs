//! HTML rendering for the transactions page.

use maud::{Markup, html};
use time::UtcOffset;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE,
        FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_ROW_STYLE, base,
        dollar_input_styles, format_currency, format_date, loading_spinner,
    },
    transaction::{
        core::{Transaction, TransactionType},
        form::{FieldError, FormField, NewTransactionForm},
        summary::Summary,
    },
};

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

pub(crate) const NEW_TRANSACTION_FORM_ID: &str = "new-transaction-form";
pub(crate) const SUMMARY_ID: &str = "summary";
pub(crate) const TRANSACTIONS_TABLE_ID: &str = "transactions-table";

/// Everything needed to render the search form.
pub(crate) struct SearchFormState<'a> {
    pub query: &'a str,
    pub error: Option<FieldError>,
}

pub(crate) fn transactions_view(
    transactions: &[Transaction],
    search: SearchFormState<'_>,
    local_offset: UtcOffset,
) -> Markup {
    let summary = Summary::from_transactions(transactions);

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-6"
            {
                header class="flex justify-between flex-wrap items-center"
                {
                    h1 class="text-2xl font-bold" { "dt money" }
                }

                section class="rounded bg-white dark:bg-gray-800 p-6"
                {
                    h2 class="text-xl font-bold mb-4" { "New Transaction" }

                    (new_transaction_form_view(&NewTransactionForm::default(), None))
                }

                (summary_view(&summary, false))

                (search_form_view(&search))

                (transactions_table_view(transactions, local_offset, false))
            }
        }
    };

    base("Transactions", &[dollar_input_styles()], &content)
}

fn field_error_view(error: Option<&FieldError>, field: FormField) -> Markup {
    html! {
        @if let Some(error) = error.filter(|error| error.field == field) {
            p class=(FORM_ERROR_STYLE) data-field-error=(field.name()) { (error.message) }
        }
    }
}

/// The form for creating a transaction.
///
/// `values` are the values to prefill the inputs with so the user can correct
/// them after a failed submission.
pub(crate) fn new_transaction_form_view(
    values: &NewTransactionForm,
    error: Option<&FieldError>,
) -> Markup {
    let is_outcome = values.selected_type() == TransactionType::Outcome;
    let spinner = loading_spinner();

    html! {
        form
            id=(NEW_TRANSACTION_FORM_ID)
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-disabled-elt="find button[type=submit]"
            class="w-full space-y-4"
        {
            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Description"
                    required
                    value=(values.description)
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error_view(error, FormField::Description))
            }

            div
            {
                label for="price" class=(FORM_LABEL_STYLE) { "Price" }

                // w-full needed to ensure input takes the full width when prefilled with a value
                div class="input-wrapper w-full"
                {
                    input
                        name="price"
                        id="price"
                        type="number"
                        step="0.01"
                        min="0"
                        placeholder="0.00"
                        required
                        value=(values.price)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (field_error_view(error, FormField::Price))
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                input
                    name="category"
                    id="category"
                    type="text"
                    placeholder="Category"
                    required
                    value=(values.category)
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error_view(error, FormField::Category))
            }

            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    div class="flex flex-1 items-center gap-3"
                    {
                        input
                            name="type"
                            id="transaction-type-income"
                            type="radio"
                            value=(TransactionType::Income)
                            checked[!is_outcome]
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for="transaction-type-income" class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Income"
                        }
                    }

                    div class="flex flex-1 items-center gap-3"
                    {
                        input
                            name="type"
                            id="transaction-type-outcome"
                            type="radio"
                            value=(TransactionType::Outcome)
                            checked[is_outcome]
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for="transaction-type-outcome" class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Outcome"
                        }
                    }
                }

                (field_error_view(error, FormField::Type))
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" { (spinner) }
                "Register"
            }
        }
    }
}

/// The income, outcome and total cards.
///
/// Set `oob` to render the summary for an out-of-band swap.
pub(crate) fn summary_view(summary: &Summary, oob: bool) -> Markup {
    let total_class = if summary.total < 0.0 {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    };

    html! {
        section
            id=(SUMMARY_ID)
            hx-swap-oob=[oob.then_some("true")]
            class="grid grid-cols-1 md:grid-cols-3 gap-4"
        {
            (summary_card("Income", &format_currency(summary.income), "income", ""))
            (summary_card("Outcome", &format_currency(summary.outcome), "outcome", ""))
            (summary_card("Total", &format_currency(summary.total), "total", total_class))
        }
    }
}

fn summary_card(title: &str, amount: &str, kind: &str, amount_class: &str) -> Markup {
    html! {
        div class="rounded bg-white dark:bg-gray-800 p-6 shadow-sm" data-summary=(kind)
        {
            header class="text-sm text-gray-500 dark:text-gray-400" { (title) }
            strong class={ "block mt-2 text-2xl " (amount_class) } { (amount) }
        }
    }
}

pub(crate) fn search_form_view(search: &SearchFormState<'_>) -> Markup {
    html! {
        form
            id="search-form"
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="w-full"
        {
            div class="flex gap-4"
            {
                input
                    name=(FormField::Query.name())
                    id="search"
                    type="text"
                    placeholder="Search transactions"
                    required
                    value=(search.query)
                    class=(FORM_TEXT_INPUT_STYLE);

                button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Search" }
            }

            (field_error_view(search.error.as_ref(), FormField::Query))
        }
    }
}

fn price_class(type_: TransactionType) -> &'static str {
    match type_ {
        TransactionType::Income => "text-green-700 dark:text-green-300",
        TransactionType::Outcome => "text-red-700 dark:text-red-300",
    }
}

/// The table of transactions, in the order given.
///
/// Set `oob` to render the table for an out-of-band swap.
pub(crate) fn transactions_table_view(
    transactions: &[Transaction],
    local_offset: UtcOffset,
    oob: bool,
) -> Markup {
    html! {
        table
            id=(TRANSACTIONS_TABLE_ID)
            hx-swap-oob=[oob.then_some("true")]
            class="w-full my-2 text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
        {
            tbody
            {
                @for transaction in transactions {
                    (transaction_row_view(transaction, local_offset))
                }

                @if transactions.is_empty() {
                    tr
                    {
                        td colspan="4" data-empty-state="true" class="px-6 py-4 text-center"
                        {
                            "No transactions found."
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row_view(transaction: &Transaction, local_offset: UtcOffset) -> Markup {
    let (description, tooltip) = format_description(&transaction.description);
    let price = match transaction.type_ {
        TransactionType::Income => format_currency(transaction.price),
        TransactionType::Outcome => format!("- {}", format_currency(transaction.price)),
    };

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) width="50%" title=[tooltip] { (description) }
            td class={ (TABLE_CELL_STYLE) " " (price_class(transaction.type_)) } { (price) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(transaction.created_at.date()) {
                    (format_date(transaction.created_at, local_offset))
                }
            }
        }
    }
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        (truncated + "...", Some(description))
    }
}
