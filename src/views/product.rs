use axum::response::Html;

use super::{escape, layout, message_list};
use crate::dtos::product::ProductForm;
use crate::models::product::Product;
use crate::models::transaction::Transaction;

pub fn list_page(products: &[Product], notice: Option<&str>) -> Html<String> {
    let notice = notice
        .map(|n| format!(r#"        <div class="notice">{}</div>"#, escape(n)))
        .unwrap_or_default();

    let table = if products.is_empty() {
        r#"        <p>No products yet. <a href="/product/add">Add the first one.</a></p>"#.to_string()
    } else {
        let rows: String = products.iter().map(product_row).collect();
        format!(
            r#"        <table>
            <thead><tr><th>ID</th><th>Name</th><th>SKU</th><th>Category</th><th>Quantity</th><th>Price</th><th></th></tr></thead>
            <tbody>
{rows}            </tbody>
        </table>"#
        )
    };

    layout("Products", &format!("{notice}\n{table}"))
}

fn product_row(product: &Product) -> String {
    format!(
        r#"                <tr class="product" data-id="{id}"><td>{id}</td><td>{name}</td><td>{sku}</td><td>{category}</td><td>{quantity}</td><td>{price}</td><td><a href="/product/update/{id}">Edit</a></td></tr>
"#,
        id = product.id,
        name = escape(&product.name),
        sku = escape(&product.sku),
        category = escape(product.category.as_deref().unwrap_or("")),
        quantity = product.quantity,
        price = product.price,
    )
}

pub fn add_page(form: &ProductForm, errors: &[String]) -> Html<String> {
    layout("Add product", &product_form("/product/add", "Add product", form, errors))
}

pub fn update_page(
    id: i64,
    form: &ProductForm,
    errors: &[String],
    ledger: &[Transaction],
) -> Html<String> {
    let action = format!("/product/update/{id}");
    let body = format!(
        "{}\n{}",
        product_form(&action, "Save changes", form, errors),
        ledger_table(ledger)
    );
    layout("Update product", &body)
}

fn product_form(action: &str, submit: &str, form: &ProductForm, errors: &[String]) -> String {
    let value = |field: &Option<String>| escape(field.as_deref().unwrap_or(""));
    format!(
        r#"        {errors}
        <form method="post" action="{action}">
            <label>Name <input type="text" name="name" maxlength="100" required value="{name}"></label>
            <label>SKU <input type="text" name="sku" maxlength="50" required value="{sku}"></label>
            <label>Category <input type="text" name="category" maxlength="50" value="{category}"></label>
            <label>Quantity <input type="number" name="quantity" step="1" value="{quantity}"></label>
            <label>Price <input type="text" name="price" inputmode="decimal" required value="{price}"></label>
            <p><button type="submit">{submit}</button></p>
        </form>"#,
        errors = message_list("errors", errors),
        action = escape(action),
        name = value(&form.name),
        sku = value(&form.sku),
        category = value(&form.category),
        quantity = value(&form.quantity),
        price = value(&form.price),
        submit = escape(submit),
    )
}

fn ledger_table(ledger: &[Transaction]) -> String {
    if ledger.is_empty() {
        return "        <h2>Stock changes</h2>\n        <p>No recorded changes.</p>".to_string();
    }

    let rows: String = ledger
        .iter()
        .map(|t| {
            format!(
                "                <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                t.created_at
                    .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_default(),
                t.change_type.as_str(),
                t.quantity_change.map(|q| format!("{q:+}")).unwrap_or_default(),
            )
        })
        .collect();

    format!(
        r#"        <h2>Stock changes</h2>
        <table>
            <thead><tr><th>When</th><th>Type</th><th>Change</th></tr></thead>
            <tbody>
{rows}            </tbody>
        </table>"#
    )
}
