use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use super::model::{validate_new, DeletedPokemon, Pokemon, PokemonPage};
use crate::errors::ServiceError;
use crate::pagination::{Pagination, PAGE_SIZE};
use crate::storage::CollectionStore;

/// CRUD operations over the Pokemon collection.
///
/// Each call loads the full collection from the injected store and each
/// mutation saves the full collection back. Nothing is cached between calls
/// and concurrent mutations are not serialized.
#[derive(Clone)]
pub struct PokemonService {
    store: Arc<dyn CollectionStore<Pokemon>>,
}

impl PokemonService {
    pub fn new(store: Arc<dyn CollectionStore<Pokemon>>) -> Self {
        Self { store }
    }

    /// One fixed-size page of the collection; never fails.
    pub async fn list(&self, pagination: Pagination) -> PokemonPage {
        let all = self.store.load().await;
        PokemonPage {
            pokemons: pagination.slice(&all).to_vec(),
            current_page: pagination.page,
            total_pages: Pagination::total_pages(all.len()),
            total_pokemons: all.len(),
            limit: PAGE_SIZE,
        }
    }

    /// First record whose english, french or japanese name contains `query`,
    /// ignoring case.
    pub async fn search_by_name(&self, query: &str) -> Result<Pokemon, ServiceError> {
        let needle = query.to_lowercase();
        self.store
            .load()
            .await
            .into_iter()
            .find(|p| p.name_contains(&needle))
            .ok_or_else(|| {
                debug!(%query, "no pokemon name matches");
                ServiceError::not_found("pokemon")
            })
    }

    pub async fn get(&self, id: u64) -> Result<Pokemon, ServiceError> {
        self.store
            .load()
            .await
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::not_found("pokemon"))
    }

    /// Append a new record with `id = max(id) + 1`; a client-supplied id is ignored.
    pub async fn create(&self, payload: Value) -> Result<Pokemon, ServiceError> {
        let Value::Object(payload) = payload else {
            return Err(ServiceError::Validation("payload must be a JSON object".into()));
        };
        validate_new(&payload)?;

        let mut all = self.store.load().await;
        let next_id = all
            .iter()
            .map(|p| p.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| ServiceError::Storage("pokemon id space exhausted".into()))?;
        let created = Pokemon::from_payload(next_id, payload);
        all.push(created.clone());
        self.store.save(&all).await?;

        info!(id = created.id, total = all.len(), "created pokemon");
        Ok(created)
    }

    /// Shallow-merge `payload` over the stored record. Non-object payloads
    /// merge nothing.
    pub async fn update(&self, id: u64, payload: Value) -> Result<Pokemon, ServiceError> {
        let patch = match payload {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let mut all = self.store.load().await;
        let existing = all
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::not_found("pokemon"))?;
        existing.merge(patch);
        existing.id = id;
        let updated = existing.clone();
        self.store.save(&all).await?;

        info!(id, "updated pokemon");
        Ok(updated)
    }

    pub async fn delete(&self, id: u64) -> Result<DeletedPokemon, ServiceError> {
        let mut all = self.store.load().await;
        let idx = all
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ServiceError::not_found("pokemon"))?;
        let removed = all.remove(idx);
        self.store.save(&all).await?;

        info!(id, remaining = all.len(), "deleted pokemon");
        Ok(DeletedPokemon::new(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn pokemon(id: u64, english: &str) -> Pokemon {
        serde_json::from_value(json!({
            "id": id,
            "name": {"english": english, "french": format!("{english}-fr"), "japanese": "ポケモン"},
            "type": ["Normal"],
            "base": {"HP": id.saturating_mul(10)}
        }))
        .unwrap()
    }

    fn service_with(items: Vec<Pokemon>) -> (PokemonService, Arc<MemoryStore<Pokemon>>) {
        let store = MemoryStore::new(items);
        (PokemonService::new(store.clone()), store)
    }

    fn bulbasaur_payload() -> Value {
        json!({
            "name": {"english": "Bulbasaur", "french": "Bulbizarre", "japanese": "フシギダネ"},
            "type": ["Grass"],
            "base": {"HP": 45}
        })
    }

    #[tokio::test]
    async fn create_on_empty_collection_assigns_id_one() {
        let (svc, store) = service_with(vec![]);
        let created = svc.create(bulbasaur_payload()).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(store.snapshot().await, vec![created.clone()]);

        // round-trip: the stored record is the payload plus the id
        let fetched = svc.get(1).await.unwrap();
        let mut expected = bulbasaur_payload();
        expected["id"] = json!(1);
        assert_eq!(serde_json::to_value(&fetched).unwrap(), expected);
    }

    #[tokio::test]
    async fn create_uses_max_id_and_ignores_client_id() {
        let (svc, _) = service_with(vec![pokemon(3, "A"), pokemon(10, "B"), pokemon(5, "C")]);
        let mut payload = bulbasaur_payload();
        payload["id"] = json!(1);
        let created = svc.create(payload).await.unwrap();
        assert_eq!(created.id, 11);
    }

    #[tokio::test]
    async fn create_refuses_when_max_id_is_taken() {
        let (svc, store) = service_with(vec![pokemon(u64::MAX, "Last")]);
        let res = svc.create(bulbasaur_payload()).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))));
        assert_eq!(store.snapshot().await, vec![pokemon(u64::MAX, "Last")]);
    }

    #[tokio::test]
    async fn create_rejects_missing_fields_and_non_objects() {
        let (svc, store) = service_with(vec![]);
        let res = svc.create(json!({"name": {"english": "X"}, "type": ["Fire"]})).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.create(json!([1, 2])).await, Err(ServiceError::Validation(_))));
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn create_surfaces_write_failure() {
        let (svc, store) = service_with(vec![pokemon(1, "A")]);
        store.set_fail_writes(true);
        let res = svc.create(bulbasaur_payload()).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))));
        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn list_pages_and_totals() {
        let items: Vec<Pokemon> = (1..=45).map(|i| pokemon(i, "P")).collect();
        let (svc, _) = service_with(items.clone());

        let first = svc.list(Pagination::default()).await;
        assert_eq!(first.pokemons, items[..20].to_vec());
        assert_eq!(first.current_page, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_pokemons, 45);
        assert_eq!(first.limit, 20);

        let last = svc.list(Pagination { page: 3 }).await;
        assert_eq!(last.pokemons.len(), 5);

        let past = svc.list(Pagination { page: 9 }).await;
        assert!(past.pokemons.is_empty());
        assert_eq!(past.current_page, 9);
    }

    #[tokio::test]
    async fn list_empty_collection_has_zero_pages() {
        let (svc, _) = service_with(vec![]);
        let page = svc.list(Pagination::default()).await;
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_pokemons, 0);
        assert!(page.pokemons.is_empty());
    }

    #[tokio::test]
    async fn search_returns_first_case_insensitive_match() {
        let (svc, _) = service_with(vec![
            pokemon(1, "Bulbasaur"),
            pokemon(4, "Charmander"),
            pokemon(5, "Charmeleon"),
        ]);
        assert_eq!(svc.search_by_name("char").await.unwrap().id, 4);
        assert_eq!(svc.search_by_name("MELEON").await.unwrap().id, 5);
        // french name
        assert_eq!(svc.search_by_name("saur-FR").await.unwrap().id, 1);
        assert!(matches!(svc.search_by_name("pikachu").await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_merges_shallowly_and_pins_id() {
        let (svc, store) = service_with(vec![pokemon(1, "A"), pokemon(2, "B")]);

        let unchanged = svc.update(2, json!({})).await.unwrap();
        assert_eq!(unchanged, pokemon(2, "B"));

        let updated = svc.update(2, json!({"id": 77, "base": {"Speed": 90}})).await.unwrap();
        assert_eq!(updated.id, 2);
        assert_eq!(updated.fields["base"], json!({"Speed": 90}));
        assert_eq!(updated.fields["name"], pokemon(2, "B").fields["name"]);
        assert_eq!(store.snapshot().await[1], updated);
        assert_eq!(store.snapshot().await[0], pokemon(1, "A"));
    }

    #[tokio::test]
    async fn update_missing_and_failing_write() {
        let (svc, store) = service_with(vec![pokemon(1, "A")]);
        assert!(matches!(svc.update(5, json!({"x": 1})).await, Err(ServiceError::NotFound(_))));

        store.set_fail_writes(true);
        assert!(matches!(svc.update(1, json!({"x": 1})).await, Err(ServiceError::Storage(_))));
        assert_eq!(store.snapshot().await, vec![pokemon(1, "A")]);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let (svc, store) = service_with(vec![pokemon(1, "A"), pokemon(2, "B"), pokemon(3, "C")]);
        let deleted = svc.delete(2).await.unwrap();
        assert_eq!(deleted.pokemon.id, 2);
        assert_eq!(deleted.message, "Pokemon deleted successfully");

        let ids: Vec<u64> = store.snapshot().await.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(matches!(svc.get(2).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(2).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_surfaces_write_failure() {
        let (svc, store) = service_with(vec![pokemon(1, "A")]);
        store.set_fail_writes(true);
        assert!(matches!(svc.delete(1).await, Err(ServiceError::Storage(_))));
        assert_eq!(store.snapshot().await.len(), 1);
    }
}
