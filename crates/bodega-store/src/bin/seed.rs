//! # Seed Data Generator
//!
//! Populates the store with test products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p bodega-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p bodega-store --bin seed -- --count 100
//!
//! # Specify database path
//! cargo run -p bodega-store --bin seed -- --db ./data/bodega.db
//! ```
//!
//! ## Generated Products
//! Creates realistic bodega stock across categories:
//! - Food and drinks (canned goods, dairy, sodas)
//! - Health (pharmacy shelf basics)
//! - Home, technology, toys, sports, books
//!
//! Each product has:
//! - Unique EAN-style barcode with the Mexican `750` prefix
//! - Name and brand as the register screen would have typed them
//! - Sale price above purchase price
//! - Expiration date spread over the next 18 months

use std::env;

use chrono::{Duration, Utc};

use bodega_core::{Category, Money, NewProduct};
use bodega_store::{ProductRepository, SqliteStore, StoreConfig};

/// Names and brands per category, letters and spaces only, the same
/// shape the register screen's sanitizers would have produced.
const CATALOG: &[(Category, &[(&str, &str)])] = &[
    (
        Category::FoodAndDrinks,
        &[
            ("Atún en Agua", "Dolores"),
            ("Frijoles Negros", "La Costeña"),
            ("Leche Entera", "Lala"),
            ("Refresco de Cola", "Coca Cola"),
            ("Galletas María", "Gamesa"),
            ("Sopa Instantánea", "Maruchan"),
            ("Café Soluble", "Nescafé"),
            ("Tortillas de Harina", "Tía Rosa"),
            ("Aceite Vegetal", "Nutrioli"),
            ("Arroz Extra", "Verde Valle"),
        ],
    ),
    (
        Category::Health,
        &[
            ("Paracetamol Tabletas", "Genomma"),
            ("Alcohol en Gel", "Medimart"),
            ("Vitamina C Masticable", "Bayer"),
            ("Jarabe para Tos", "Vick"),
            ("Curitas Surtidas", "Nexcare"),
        ],
    ),
    (
        Category::HomeAndFurniture,
        &[
            ("Detergente en Polvo", "Ariel"),
            ("Suavizante de Telas", "Downy"),
            ("Foco Ahorrador", "Philips"),
            ("Escoba de Plástico", "Perico"),
            ("Servilletas de Papel", "Pétalo"),
        ],
    ),
    (
        Category::Technology,
        &[
            ("Pilas Alcalinas", "Duracell"),
            ("Cable de Carga", "Steren"),
            ("Audífonos de Cable", "Sony"),
            ("Cargador de Pared", "Belkin"),
            ("Memoria Portátil", "Kingston"),
        ],
    ),
    (
        Category::ToysAndGames,
        &[
            ("Pelota de Vinil", "Fantastik"),
            ("Carrito de Juguete", "Hot Wheels"),
            ("Burbujas de Jabón", "Gazillion"),
            ("Baraja Española", "Fournier"),
        ],
    ),
    (
        Category::Sports,
        &[
            ("Pelota de Futbol", "Voit"),
            ("Lazo para Saltar", "Gaia"),
            ("Botella Deportiva", "Contigo"),
        ],
    ),
    (
        Category::Books,
        &[
            ("Libreta Profesional", "Scribe"),
            ("Cuaderno de Dibujo", "Norma"),
        ],
    ),
];

/// Presentation variants
const VARIANTS: &[(&str, i64)] = &[
    ("Chico", 0),
    ("Mediano", 200),
    ("Grande", 450),
    ("Familiar", 900),
    ("Jumbo", 1500),
    ("Ahorro", 700),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./bodega_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bodega Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./bodega_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bodega Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    // Connect to store
    let config = StoreConfig::new(&db_path);
    let store = SqliteStore::new(config).await?;
    let repo = ProductRepository::new(store);

    println!("✓ Connected to store");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = repo.list().await?.len();
    if existing > 0 {
        println!("⚠ Store already has {} products", existing);
        println!("  Skipping seed to avoid duplicate barcodes.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Generate products
    println!();
    println!("Generating products...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    'catalog: for (category_idx, (category, items)) in CATALOG.iter().enumerate() {
        for (item_idx, (name, brand)) in items.iter().enumerate() {
            for (variant_idx, (variant, price_addon)) in VARIANTS.iter().enumerate() {
                if generated >= count {
                    break 'catalog;
                }

                let seed = category_idx * 1000 + item_idx * 10 + variant_idx;
                let product =
                    generate_product(*category, name, brand, variant, *price_addon, seed);

                if let Err(e) = repo.insert(&product).await {
                    eprintln!("Failed to insert {}: {}", product.barcode, e);
                    continue;
                }

                generated += 1;

                if generated % 50 == 0 {
                    println!("  Generated {} products...", generated);
                }
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);
    println!(
        "  Rate: {:.0} products/second",
        generated as f64 / elapsed.as_secs_f64()
    );

    // Verify reads
    println!();
    println!("Verifying catalog...");
    let products = repo.list().await?;
    println!("  Catalog lists {} complete products", products.len());

    if let Some(sample) = products.first() {
        let taken = repo.barcode_in_use(&sample.barcode).await?;
        println!(
            "  Barcode lookup '{}': {}",
            sample.barcode,
            if taken { "in use" } else { "free" }
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with realistic data.
fn generate_product(
    category: Category,
    name: &str,
    brand: &str,
    variant: &str,
    price_addon: i64,
    seed: usize,
) -> NewProduct {
    // EAN-13 style barcode with the Mexican 750 prefix (checksum not valid)
    let barcode = format!("750{:010}", 1_000_000 + seed);

    // Sale price: $5.50 - $99.99 base plus the variant addon
    let sale_cents = 550 + ((seed * 37) % 9450) as i64 + price_addon;

    // Purchase at 60-79% of sale, always strictly below
    let purchase_pct = 60 + (seed % 20) as i64;
    let purchase_cents = (sale_cents * purchase_pct / 100).max(1);

    // Expiration spread over the next 18 months
    let expiration_date = Utc::now() + Duration::days(30 + (seed % 540) as i64);

    NewProduct {
        product_name: format!("{} {}", name, variant),
        brand: brand.to_string(),
        stock: 1 + (seed % 60) as i64,
        category,
        purchase_price: Money::from_cents(purchase_cents),
        sale_price: Money::from_cents(sale_cents),
        barcode,
        expiration_date,
    }
}
