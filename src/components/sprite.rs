use bevy_ecs::prelude::Component;

/// Static appearance of a non-animated entity, identified by an icon key the
/// renderer resolves. `alpha` is the translucency the renderer applies.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub icon: String,
    pub alpha: u8,
}

impl Sprite {
    pub fn new(icon: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            alpha: 255,
        }
    }

    pub fn set_icon(&mut self, icon: &str) {
        self.icon.clear();
        self.icon.push_str(icon);
    }
}
