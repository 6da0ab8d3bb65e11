/// One of the 32 scene layers an object can live on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Layer(u8);

impl Layer {
    pub const COUNT: u8 = 32;

    /// Returns `None` if `index` is not below [`Self::COUNT`].
    #[inline]
    pub fn new(index: u8) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index))
    }

    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Selects the scene layers that are outlined as one group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    pub fn from_layers(layers: impl IntoIterator<Item = Layer>) -> Self {
        Self(layers.into_iter().fold(0, |bits, layer| bits | (1 << layer.0)))
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn contains(self, layer: Layer) -> bool {
        self.0 & (1 << layer.0) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_mask_membership() {
        let [a, b, c] = [3, 17, 31].map(|i| Layer::new(i).unwrap());
        let mask = LayerMask::from_layers([a, c]);

        assert!(mask.contains(a));
        assert!(!mask.contains(b));
        assert!(mask.contains(c));
        assert!(!mask.is_empty());
        assert!(LayerMask::NONE.is_empty());
        assert!(LayerMask::ALL.contains(b));
        assert_eq!(Layer::new(32), None);
    }
}
