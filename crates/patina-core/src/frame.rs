use kurbo::{Affine, Point, Rect, Vec2};

/// The container's composed transform: translate by `offset`, then scale
/// by `zoom` about `origin` (the container center).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub zoom: f64,
    pub offset: Vec2,
    pub origin: Point,
}

impl Transform {
    /// Maps untransformed container coordinates to device coordinates.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.origin.to_vec2() + self.offset)
            * Affine::scale(self.zoom)
            * Affine::translate(-self.origin.to_vec2())
    }

    /// Where the container's layout rect lands on screen.
    pub fn apply_to_rect(&self, rect: Rect) -> Rect {
        self.to_affine().transform_rect_bbox(rect)
    }

    /// CSS `transform` value, paired with `transform-origin: 50% 50%`.
    pub fn css(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) scale({:.4})",
            self.offset.x, self.offset.y, self.zoom
        )
    }
}

/// Visibility flag for every layer of one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerVisibility {
    pub rest: bool,
    /// One flag per decay layer, least worn first.
    pub decay: Vec<bool>,
    pub effect: bool,
}

impl LayerVisibility {
    /// Rest layer only: the state at start-up and after a reset.
    pub fn at_rest(decay_layers: usize) -> Self {
        Self {
            rest: true,
            decay: vec![false; decay_layers],
            effect: false,
        }
    }

    pub fn visible_decay(&self) -> usize {
        self.decay.iter().filter(|&&v| v).count()
    }

    /// Index of the most worn visible decay layer.
    pub fn worst_visible(&self) -> Option<usize> {
        self.decay.iter().rposition(|&v| v)
    }
}

impl std::fmt::Display for LayerVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = |v: bool| if v { 'x' } else { '.' };
        write!(f, "rest {} decay [", mark(self.rest))?;
        for (i, &v) in self.decay.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", mark(v))?;
        }
        write!(f, "] effect {}", mark(self.effect))
    }
}

/// Everything a presentation layer needs for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub transform: Transform,
    pub layers: LayerVisibility,
}
