//! The fixed catalog used to seed an empty database and to keep the client
//! usable while the API is down.

use rust_decimal::Decimal;

use crate::models::NewProduct;

const SAMPLE_CATALOG: [(&str, &str, i64, i32, &str); 10] = [
    (
        "MacBook Pro M3",
        "Laptop Apple com chip M3, 16GB RAM, 512GB SSD",
        249999,
        15,
        "Eletrônicos",
    ),
    (
        "iPhone 15 Pro",
        "Smartphone Apple com câmera de 48MP",
        119999,
        30,
        "Eletrônicos",
    ),
    (
        "Clean Code",
        "Livro sobre boas práticas de programação",
        4999,
        50,
        "Livros",
    ),
    (
        "Camiseta Premium",
        "Camiseta 100% algodão, várias cores",
        2999,
        100,
        "Roupas",
    ),
    (
        "Ferramentas Profissionais",
        "Kit com 50 peças para manutenção",
        19999,
        25,
        "Automotivo",
    ),
    (
        "Café Especial",
        "Grãos de café premium, torra média",
        2499,
        80,
        "Alimentos & Bebidas",
    ),
    (
        "Notebook Executivo",
        "Caderno de couro com 200 folhas",
        3999,
        60,
        "Materiais de Escritório",
    ),
    (
        "Bola de Futebol",
        "Bola oficial tamanho 5",
        8999,
        40,
        "Esportes",
    ),
    (
        "Shampoo Revitalizante",
        "Shampoo para cabelos danificados",
        3499,
        75,
        "Saúde e Beleza",
    ),
    (
        "Lego Classic",
        "Kit com 1500 peças para construção",
        7999,
        35,
        "Brinquedos",
    ),
];

pub fn sample_catalog() -> Vec<NewProduct> {
    SAMPLE_CATALOG
        .iter()
        .map(|&(name, description, cents, quantity, category)| NewProduct {
            name: name.to_string(),
            description: description.to_string(),
            price: Decimal::new(cents, 2),
            quantity,
            category: category.to_string(),
        })
        .collect()
}
