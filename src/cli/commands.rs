use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::app::{AppContext, Result, VintiqueError};
use crate::backup;
use crate::domain::{
    coerce_amount, format_money, format_optional_money, resolve_image, summarize, Item, ItemDraft,
    ItemPatch,
};

/// Ask a yes/no question on stdin. Anything but `y`/`yes` means no.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Resolve a full id or a unique id prefix. Unknown ids are returned as-is.
pub fn resolve_id(ctx: &AppContext, id: &str) -> Result<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(VintiqueError::Validation("item id must not be empty".into()));
    }
    if ctx.store.get(id).is_some() {
        return Ok(id.to_string());
    }

    let matches: Vec<&Item> = ctx
        .store
        .snapshot()
        .iter()
        .filter(|item| item.id.starts_with(id))
        .collect();

    match matches.as_slice() {
        [item] => Ok(item.id.clone()),
        [] => Ok(id.to_string()),
        _ => Err(VintiqueError::Validation(format!(
            "id prefix {} matches {} items",
            id,
            matches.len()
        ))),
    }
}

pub fn add_item(ctx: &mut AppContext, draft: ItemDraft, image: Option<&str>) -> Result<Item> {
    let draft = ItemDraft {
        image_url: image.map(resolve_image).transpose()?.unwrap_or_default(),
        ..draft
    };

    let item = ctx.store.add(draft)?;
    println!("Added: {} ({})", item.name, short_id(&item.id));
    Ok(item)
}

pub struct EditArgs<'a> {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<&'a str>,
    pub cost: Option<&'a str>,
    pub price: Option<&'a str>,
}

pub fn edit_item(ctx: &mut AppContext, id: &str, args: EditArgs<'_>) -> Result<()> {
    let id = resolve_id(ctx, id)?;
    let Some(item) = ctx.store.get(&id) else {
        println!("No item with id {}", id);
        return Ok(());
    };
    if item.is_sold() {
        return Err(VintiqueError::InvalidState(format!(
            "\"{}\" is sold and can no longer be edited",
            item.name
        )));
    }

    let patch = ItemPatch {
        name: args.name,
        description: args.description,
        image_url: args.image.map(resolve_image).transpose()?,
        cost: args.cost.map(coerce_amount),
        potential_revenue: args.price.map(coerce_amount),
    };
    if patch.is_empty() {
        println!("Nothing to change");
        return Ok(());
    }

    ctx.store.update(&id, &patch)?;
    println!("Updated: {}", short_id(&id));
    Ok(())
}

pub fn sell_item(ctx: &mut AppContext, id: &str, price: &str) -> Result<()> {
    let id = resolve_id(ctx, id)?;
    let price = coerce_amount(price);

    if ctx.store.mark_sold(&id, price)? {
        println!("Sold {} for {}", short_id(&id), format_money(price, ctx.currency()));
    } else {
        println!("No item with id {}", id);
    }
    Ok(())
}

pub fn delete_item(ctx: &mut AppContext, id: &str, yes: bool) -> Result<()> {
    let id = resolve_id(ctx, id)?;
    let Some(item) = ctx.store.get(&id) else {
        println!("No item with id {}", id);
        return Ok(());
    };

    let prompt = format!("Permanently delete \"{}\"?", item.name);
    if !yes && !confirm(&prompt)? {
        println!("Delete cancelled");
        return Ok(());
    }

    ctx.store.delete(&id)?;
    println!("Deleted: {}", short_id(&id));
    Ok(())
}

pub fn list_items(ctx: &AppContext) -> Result<()> {
    let items = ctx.store.snapshot();

    if items.is_empty() {
        println!("No items");
        return Ok(());
    }

    for item in items {
        let marker = if item.is_sold() { "✓" } else { "●" };
        println!(
            "{} {} {} {:<40} {:>12}  {}",
            marker,
            short_id(&item.id),
            item.date_added.format("%Y-%m-%d"),
            item.name,
            format_optional_money(item.display_price(), ctx.currency()),
            item.status
        );
    }

    Ok(())
}

pub fn show_item(ctx: &AppContext, id: &str) -> Result<()> {
    let id = resolve_id(ctx, id)?;
    let item = ctx
        .store
        .get(&id)
        .ok_or_else(|| VintiqueError::ItemNotFound(id.clone()))?;
    let currency = ctx.currency();

    println!("{}", item.name);
    println!("  id:         {}", item.id);
    println!("  status:     {}", item.status);
    println!("  added:      {}", item.date_added.format("%Y-%m-%d %H:%M"));
    println!("  cost:       {}", format_money(item.cost, currency));
    println!("  list price: {}", format_money(item.potential_revenue, currency));
    if item.is_sold() {
        println!("  sold for:   {}", format_optional_money(item.sold_price, currency));
    }
    if !item.image_url.is_empty() {
        println!("  image:      {}", abbreviate_image(&item.image_url));
    }
    if !item.description.is_empty() {
        println!();
        println!("{}", item.description);
    }

    Ok(())
}

pub fn print_summary(ctx: &AppContext) -> Result<()> {
    let summary = summarize(ctx.store.snapshot());
    let currency = ctx.currency();

    println!("Total Inventory Cost  {:>14}", format_money(summary.total_cost, currency));
    println!("Potential Revenue     {:>14}", format_money(summary.potential_revenue, currency));
    println!("Total Sales           {:>14}", format_money(summary.total_sales, currency));
    println!("Total Profit          {:>14}", format_money(summary.total_profit, currency));
    Ok(())
}

pub fn export_backup(ctx: &AppContext, dir: Option<&Path>) -> Result<()> {
    let dir = dir
        .map(Path::to_path_buf)
        .or_else(|| ctx.config.display.backup_dir.clone())
        .unwrap_or_else(|| ".".into());

    let path = backup::export_to_dir(ctx.store.snapshot(), &dir)?;
    println!(
        "Exported {} items to {}",
        ctx.store.snapshot().len(),
        path.display()
    );
    Ok(())
}

pub fn import_backup(ctx: &mut AppContext, path: &Path, yes: bool) -> Result<()> {
    let items = backup::read_backup(path)?;

    let prompt = format!(
        "This will overwrite your current inventory ({} items) with {} items. Continue?",
        ctx.store.snapshot().len(),
        items.len()
    );
    if !yes && !confirm(&prompt)? {
        println!("Import cancelled");
        return Ok(());
    }

    let count = items.len();
    ctx.store.replace_all(items)?;
    println!("Imported {} items from {}", count, path.display());
    Ok(())
}

pub async fn describe(ctx: &AppContext, keywords: &[String]) -> Result<()> {
    let text = ctx
        .assistant
        .generate_description(&keywords.join(" "))
        .await;
    println!("{}", text);
    Ok(())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn abbreviate_image(url: &str) -> String {
    if url.starts_with("data:") {
        let header = url.split(',').next().unwrap_or(url);
        format!("{},… ({} bytes)", header, url.len())
    } else {
        url.to_string()
    }
}
