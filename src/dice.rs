use rand::Rng;

pub const FACES: u8 = 6;
/// Rolling this face loses everything accumulated in the turn.
pub const BUST_FACE: u8 = 1;

/// Source of randomness consumed by the game engine.
///
/// Anything implementing [`rand::Rng`] is a fair die; tests can plug in a
/// scripted sequence instead.
pub trait Die {
    /// Uniform face in `1..=6`.
    fn roll(&mut self) -> u8;
    /// Fair coin used by the random decision.
    fn coin(&mut self) -> bool;
}

impl<R: Rng + ?Sized> Die for R {
    fn roll(&mut self) -> u8 {
        self.gen_range(1..=FACES)
    }

    fn coin(&mut self) -> bool {
        self.gen_bool(0.5)
    }
}

/// Replays fixed face and coin sequences, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedDie {
    faces: Vec<u8>,
    coins: Vec<bool>,
    next_face: usize,
    next_coin: usize,
}

impl ScriptedDie {
    pub fn new(faces: Vec<u8>) -> Self {
        Self::with_coins(faces, vec![false])
    }

    pub fn with_coins(faces: Vec<u8>, coins: Vec<bool>) -> Self {
        assert!(!faces.is_empty() && !coins.is_empty(), "empty script");
        assert!(
            faces.iter().all(|f| (1..=FACES).contains(f)),
            "die face out of range"
        );
        ScriptedDie {
            faces,
            coins,
            next_face: 0,
            next_coin: 0,
        }
    }

    pub fn rolls_taken(&self) -> usize {
        self.next_face
    }
}

impl Die for ScriptedDie {
    fn roll(&mut self) -> u8 {
        let face = self.faces[self.next_face % self.faces.len()];
        self.next_face += 1;
        face
    }

    fn coin(&mut self) -> bool {
        let coin = self.coins[self.next_coin % self.coins.len()];
        self.next_coin += 1;
        coin
    }
}

/// Set of die faces packed into a bitmask, bit `n` for face `n`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct FaceSet(u8);

impl FaceSet {
    pub const EMPTY: FaceSet = FaceSet(0);

    pub const fn of(faces: &[u8]) -> FaceSet {
        let mut bits = 0u8;
        let mut i = 0;
        while i < faces.len() {
            let face = faces[i];
            assert!(face >= 1 && face <= FACES, "die face out of range");
            bits |= 1 << face;
            i += 1;
        }
        FaceSet(bits)
    }

    pub const fn contains(self, face: u8) -> bool {
        face <= FACES && self.0 & (1 << face) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn rolls_stay_on_the_die() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut seen = [false; 7];
        for _ in 0..1000 {
            let face = rng.roll();
            assert!((1..=6).contains(&face));
            seen[face as usize] = true;
        }
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn face_set_membership() {
        let set = FaceSet::of(&[4, 5, 6]);
        assert!(set.contains(5));
        assert!(!set.contains(3));
        assert!(!set.contains(0));
        assert!(!set.contains(7));
        assert!((1..=FACES).all(|f| !FaceSet::EMPTY.contains(f)));
    }
}
