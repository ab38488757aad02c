//! Per-animal selection state and how it is restored from a [`PreferenceStore`].

use crate::domain::feed::{AnimalId, FeedRecommendation, FodderAvailability, HusbandrySystem};
use crate::storage::{PrefField, PrefKey, PrefValue, PreferenceStore};
use anyhow::Context;

/// Selection of a milk-yield screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MilkYieldSelection {
    pub milk_yield: f64,
    pub availability: FodderAvailability,
}

impl MilkYieldSelection {
    /// Highest yield on the list, high fodder availability.
    pub fn defaults(records: &[FeedRecommendation]) -> anyhow::Result<Self> {
        let milk_yield = records
            .iter()
            .rev()
            .find_map(FeedRecommendation::milk_yield)
            .context("no milk-yield records to select from")?;
        Ok(Self {
            milk_yield,
            availability: FodderAvailability::High,
        })
    }

    pub fn load(
        store: &dyn PreferenceStore,
        animal: AnimalId,
        records: &[FeedRecommendation],
    ) -> anyhow::Result<Self> {
        let defaults = Self::defaults(records)?;

        let milk_yield = store.get_f64(
            &PrefKey::selection(animal, PrefField::MilkYield),
            defaults.milk_yield,
        );
        let milk_yield = if milk_yield.is_finite() {
            milk_yield
        } else {
            defaults.milk_yield
        };

        let stored = store.get_text(
            &PrefKey::selection(animal, PrefField::FodderAvailability),
            defaults.availability.name(),
        );
        let availability = stored.parse().unwrap_or_else(|err| {
            tracing::warn!(%animal, error = %err, "ignoring persisted fodder availability");
            defaults.availability
        });

        let selection = Self {
            milk_yield,
            availability,
        };
        tracing::debug!(%animal, milk_yield, availability = availability.name(), "selection restored");
        Ok(selection)
    }

    pub fn save_milk_yield(&self, store: &mut dyn PreferenceStore, animal: AnimalId) {
        store.set(
            PrefKey::selection(animal, PrefField::MilkYield),
            PrefValue::Float(self.milk_yield),
        );
    }

    pub fn save_availability(&self, store: &mut dyn PreferenceStore, animal: AnimalId) {
        store.set(
            PrefKey::selection(animal, PrefField::FodderAvailability),
            PrefValue::Text(self.availability.name().to_string()),
        );
    }

    pub fn save(&self, store: &mut dyn PreferenceStore, animal: AnimalId) {
        self.save_milk_yield(store, animal);
        self.save_availability(store, animal);
    }
}

/// Selection of a body-weight screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyWeightSelection {
    pub body_weight: u32,
    pub system: HusbandrySystem,
}

impl BodyWeightSelection {
    /// Lightest weight on the list, intensive system.
    pub fn defaults(records: &[FeedRecommendation]) -> anyhow::Result<Self> {
        let body_weight = records
            .iter()
            .find_map(FeedRecommendation::body_weight)
            .context("no body-weight records to select from")?;
        Ok(Self {
            body_weight,
            system: HusbandrySystem::Intensive,
        })
    }

    pub fn load(
        store: &dyn PreferenceStore,
        animal: AnimalId,
        records: &[FeedRecommendation],
    ) -> anyhow::Result<Self> {
        let defaults = Self::defaults(records)?;

        let stored = store.get_i64(
            &PrefKey::selection(animal, PrefField::BodyWeight),
            i64::from(defaults.body_weight),
        );
        let body_weight = u32::try_from(stored).unwrap_or_else(|_| {
            tracing::warn!(%animal, stored, "ignoring persisted body weight");
            defaults.body_weight
        });

        let index = store.get_i64(
            &PrefKey::selection(animal, PrefField::SystemType),
            defaults.system.index() as i64,
        );
        let system = usize::try_from(index)
            .ok()
            .and_then(HusbandrySystem::from_index)
            .unwrap_or_else(|| {
                tracing::warn!(%animal, index, "ignoring persisted system index");
                defaults.system
            });

        tracing::debug!(%animal, body_weight, system_index = system.index(), "selection restored");
        Ok(Self {
            body_weight,
            system,
        })
    }

    pub fn save_body_weight(&self, store: &mut dyn PreferenceStore, animal: AnimalId) {
        store.set(
            PrefKey::selection(animal, PrefField::BodyWeight),
            PrefValue::Int(i64::from(self.body_weight)),
        );
    }

    pub fn save_system(&self, store: &mut dyn PreferenceStore, animal: AnimalId) {
        store.set(
            PrefKey::selection(animal, PrefField::SystemType),
            PrefValue::Int(self.system.index() as i64),
        );
    }

    pub fn save(&self, store: &mut dyn PreferenceStore, animal: AnimalId) {
        self.save_body_weight(store, animal);
        self.save_system(store, animal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::load_bundled;
    use crate::storage::memory::MemoryStore;

    #[test]
    fn defaults_follow_the_record_order() {
        let dataset = load_bundled().unwrap();
        let cows = dataset.recommendations(AnimalId(0)).unwrap();
        let heifers = dataset.recommendations(AnimalId(2)).unwrap();

        let store = MemoryStore::new();
        let milk = MilkYieldSelection::load(&store, AnimalId(0), cows).unwrap();
        assert_eq!(milk.milk_yield, 20.0);
        assert_eq!(milk.availability, FodderAvailability::High);

        let weight = BodyWeightSelection::load(&store, AnimalId(2), heifers).unwrap();
        assert_eq!(weight.body_weight, 75);
        assert_eq!(weight.system, HusbandrySystem::Intensive);

        assert!(MilkYieldSelection::defaults(heifers).is_err());
        assert!(BodyWeightSelection::defaults(&[]).is_err());
    }

    #[test]
    fn saved_selection_is_restored_for_the_same_animal_only() {
        let dataset = load_bundled().unwrap();
        let cows = dataset.recommendations(AnimalId(0)).unwrap();
        let buffaloes = dataset.recommendations(AnimalId(1)).unwrap();
        let mut store = MemoryStore::new();

        let chosen = MilkYieldSelection {
            milk_yield: 7.5,
            availability: FodderAvailability::Low,
        };
        chosen.save(&mut store, AnimalId(0));

        assert_eq!(MilkYieldSelection::load(&store, AnimalId(0), cows).unwrap(), chosen);
        let other = MilkYieldSelection::load(&store, AnimalId(1), buffaloes).unwrap();
        assert_eq!(other, MilkYieldSelection::defaults(buffaloes).unwrap());
    }

    #[test]
    fn unparseable_values_fall_back_but_unknown_values_are_kept() {
        let dataset = load_bundled().unwrap();
        let heifers = dataset.recommendations(AnimalId(2)).unwrap();
        let mut store = MemoryStore::new();
        let animal = AnimalId(2);

        store.set(PrefKey::selection(animal, PrefField::BodyWeight), PrefValue::Int(-4));
        store.set(PrefKey::selection(animal, PrefField::SystemType), PrefValue::Int(9));
        let loaded = BodyWeightSelection::load(&store, animal, heifers).unwrap();
        assert_eq!(loaded, BodyWeightSelection::defaults(heifers).unwrap());

        store.set(PrefKey::selection(animal, PrefField::BodyWeight), PrefValue::Int(333));
        store.set(PrefKey::selection(animal, PrefField::SystemType), PrefValue::Int(1));
        let loaded = BodyWeightSelection::load(&store, animal, heifers).unwrap();
        assert_eq!(loaded.body_weight, 333);
        assert_eq!(loaded.system, HusbandrySystem::SemiIntensive);

        store.set(
            PrefKey::selection(AnimalId(0), PrefField::FodderAvailability),
            PrefValue::Text("PLENTY".into()),
        );
        let cows = dataset.recommendations(AnimalId(0)).unwrap();
        let milk = MilkYieldSelection::load(&store, AnimalId(0), cows).unwrap();
        assert_eq!(milk.availability, FodderAvailability::High);
    }
}
