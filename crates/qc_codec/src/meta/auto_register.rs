use crate::meta::StructInfo;

/// A link-time registration of struct metadata, see [`submit_struct!`].
///
/// [`submit_struct!`]: crate::submit_struct
pub struct StructRegistration {
    build: fn() -> StructInfo,
}

impl StructRegistration {
    #[inline]
    pub const fn new(build: fn() -> StructInfo) -> Self {
        Self { build }
    }

    /// Builds the registered metadata.
    #[inline]
    pub fn info(&self) -> StructInfo {
        (self.build)()
    }
}

inventory::collect!(StructRegistration);

/// Collects every submitted [`StructInfo`].
pub(crate) fn registered_structs() -> impl Iterator<Item = StructInfo> {
    inventory::iter::<StructRegistration>
        .into_iter()
        .map(StructRegistration::info)
}

/// Registers struct metadata at link time.
///
/// The argument is a `fn() -> StructInfo`. Registered metadata is added by
/// [`EngineBuilder::auto_register`](crate::EngineBuilder::auto_register).
///
/// Requires the `auto_register` feature.
///
/// # Examples
///
/// ```
/// use qc_codec::{CodecEngine, RawType, StructInfo, TypeKey};
///
/// const USER: RawType = RawType::new("my_app::User");
///
/// fn user_info() -> StructInfo {
///     StructInfo::new(USER).with_field("name", TypeKey::of(RawType::STRING))
/// }
///
/// qc_codec::submit_struct!(user_info);
///
/// fn main() {
///     let engine = CodecEngine::builder().auto_register().build();
///     assert!(engine.types().contains(USER));
///     assert!(engine.codec_for(&TypeKey::of(USER)).is_ok());
/// }
/// ```
#[macro_export]
macro_rules! submit_struct {
    ($build:expr $(,)?) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::meta::StructRegistration::new($build)
        }
    };
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::key::{RawType, TypeKey};
    use crate::meta::StructInfo;
    use crate::{CodecEngine, EngineBuilder};

    const AUTO: RawType = RawType::new("qc_codec::tests::Auto");

    fn auto_info() -> StructInfo {
        StructInfo::new(AUTO).with_field("flag", TypeKey::of(RawType::BOOL))
    }

    crate::submit_struct!(auto_info);

    #[test]
    fn submitted_structs_are_collected() {
        let engine = CodecEngine::builder().auto_register().build();
        assert_eq!(engine.types().get(AUTO), Some(&auto_info()));
    }

    #[test]
    fn explicit_registration_after_auto_register_wins() {
        let replaced = StructInfo::new(AUTO);
        let engine = EngineBuilder::new()
            .auto_register()
            .add_struct(replaced.clone())
            .build();
        assert_eq!(engine.types().get(AUTO), Some(&replaced));
    }
}
