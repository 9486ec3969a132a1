use clap::Args;

use gryadka::{favorites::FavoritesLedger, products::ProductId};
use gryadka_client::config::StorageConfig;

#[derive(Debug, Args)]
pub(crate) struct FavoriteArgs {
    /// Product id
    pub(crate) id: u64,
}

pub(crate) fn toggle(storage: &StorageConfig, args: &FavoriteArgs) {
    let mut favorites = FavoritesLedger::load(storage.favorites_store());
    let id = ProductId::new(args.id);

    if favorites.toggle(id) {
        println!("товар {id} добавлен в избранное");
    } else {
        println!("товар {id} удален из избранного");
    }
}

pub(crate) fn list(storage: &StorageConfig) {
    let favorites = FavoritesLedger::load(storage.favorites_store());

    if favorites.is_empty() {
        println!("избранное пусто");
        return;
    }

    for id in favorites.ids() {
        println!("{id}");
    }
}
