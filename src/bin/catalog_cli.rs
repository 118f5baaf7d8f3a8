use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use product_catalog::client::views::{
    delete_product, submit_create, submit_update, DeleteOutcome, DetailView, FormOutcome,
    ListView, LoadState, ProductForm,
};
use product_catalog::client::{FallbackSource, RemoteSource};
use product_catalog::config::ClientConfig;
use product_catalog::models::Product;
use product_catalog::validation::{FieldErrors, ValidationRules, CATEGORIES};

#[derive(Parser)]
#[command(name = "catalog-cli", about = "Terminal client for the product catalog API", version)]
struct Cli {
    #[arg(long, global = true, help = "Base URL of the API (overrides PRODUCT_API_URL)")]
    api_url: Option<String>,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Fail instead of showing sample data when the API is unreachable"
    )]
    no_fallback: bool,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Accept categories outside the known list"
    )]
    free_categories: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every product
    List,
    /// Show one product
    Show { id: i64 },
    /// Create a product
    Create(FormArgs),
    /// Edit a product; omitted fields keep their current value
    Edit {
        id: i64,
        #[command(flatten)]
        fields: FormArgs,
    },
    /// Delete a product
    Delete {
        id: i64,
        #[arg(long, action = ArgAction::SetTrue, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    /// List the known categories
    Categories,
}

#[derive(Args)]
struct FormArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    quantity: Option<String>,
    #[arg(long)]
    category: Option<String>,
}

impl FormArgs {
    fn apply_to(self, form: &mut ProductForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(quantity) = self.quantity {
            form.quantity = quantity;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    let api_url = cli.api_url.unwrap_or(config.api_url);
    let remote = RemoteSource::new(api_url);
    let source = FallbackSource::with_samples(remote.clone())
        .enabled(config.sample_fallback && !cli.no_fallback);
    let rules = if cli.free_categories {
        ValidationRules::free_text()
    } else {
        ValidationRules::strict()
    };

    match cli.command {
        Commands::List => {
            let mut view = ListView::new();
            view.load(&source).await;
            match view.state() {
                LoadState::Ready(_) => {
                    print_warning(view.state().warning());
                    print_table(view.products());
                }
                LoadState::Failed(message) => bail!("{}", message),
                LoadState::Loading => {}
            }
        }
        Commands::Show { id } => {
            let mut view = DetailView::new(id);
            view.load(&source).await;
            if let LoadState::Failed(message) = view.state() {
                bail!("{}", message);
            }
            print_warning(view.state().warning());
            if let Some(product) = view.product() {
                print_product(product);
            }
        }
        Commands::Create(fields) => {
            let mut form = ProductForm::default();
            fields.apply_to(&mut form);
            report_form(submit_create(&remote, &rules, &form).await)?;
        }
        Commands::Edit { id, fields } => {
            let mut view = DetailView::new(id);
            view.load(&source).await;
            let Some(product) = view.product() else {
                bail!("No se pudo cargar el producto {}", id);
            };
            print_warning(view.state().warning());
            let mut form = ProductForm::from_product(product);
            fields.apply_to(&mut form);
            report_form(submit_update(&remote, &rules, id, &form).await)?;
        }
        Commands::Delete { id, yes } => {
            let confirmed = yes || confirm(&format!("¿Eliminar el producto {}? [s/N] ", id))?;
            match delete_product(&remote, id, confirmed).await {
                DeleteOutcome::Cancelled => println!("Operación cancelada"),
                DeleteOutcome::Deleted { .. } => println!("Producto {} eliminado", id),
                DeleteOutcome::NavigatedAway { warning, .. } => {
                    println!("Aviso: {}", warning);
                }
            }
        }
        Commands::Categories => {
            for category in CATEGORIES {
                println!("{}", category);
            }
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes"))
}

fn report_form(outcome: FormOutcome) -> Result<()> {
    match outcome {
        FormOutcome::Saved { product, .. } => {
            println!("Producto guardado correctamente");
            print_product(&product);
            Ok(())
        }
        FormOutcome::Invalid(errors) => {
            print_field_errors(&errors);
            bail!("El producto no se guardó")
        }
        FormOutcome::Failed(message) => bail!("{}", message),
    }
}

fn print_warning(warning: Option<&str>) {
    if let Some(warning) = warning {
        eprintln!("Aviso: {}", warning);
    }
}

fn print_field_errors(errors: &FieldErrors) {
    for (field, messages) in errors.iter() {
        for message in messages {
            eprintln!("  {}: {}", field, message);
        }
    }
}

fn print_table(products: &[Product]) {
    println!(
        "{:>5}  {:<28}  {:>12}  {:>8}  {:<24}",
        "ID", "Nombre", "Precio", "Cant.", "Categoría"
    );
    for product in products {
        println!(
            "{:>5}  {:<28}  {:>12}  {:>8}  {:<24}",
            product.id,
            truncate(&product.name, 28),
            format!("R$ {:.2}", product.price),
            product.quantity,
            product.category
        );
    }
    println!("{} productos", products.len());
}

fn print_product(product: &Product) {
    println!("ID:          {}", product.id);
    println!("Nombre:      {}", product.name);
    println!("Descripción: {}", product.description);
    println!("Precio:      R$ {:.2}", product.price);
    println!("Cantidad:    {}", product.quantity);
    println!("Categoría:   {}", product.category);
    println!("Creado:      {}", product.created_at.format("%d/%m/%Y %H:%M"));
    println!("Actualizado: {}", product.updated_at.format("%d/%m/%Y %H:%M"));
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(max - 1).collect();
        short.push('…');
        short
    }
}
