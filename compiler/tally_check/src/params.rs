//! Parameter models: documented parameter types by name.

use tally_index::{Pin, SymbolIndex, TagKind};
use tally_types::ComplexType;

/// The documented type of one parameter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamType {
    /// The tag's type list as written.
    pub tagged: String,
    /// The tag resolved against the declaring namespace; `undefined` when
    /// any part of it names something unknown.
    pub qualified: ComplexType,
}

/// `@param` types of one declaration, in documentation order.
///
/// Parameters without a typed tag are absent. The first tag for a name
/// wins.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParamModel {
    entries: Vec<(String, ParamType)>,
}

impl ParamModel {
    /// Build the model from `pin`'s documentation.
    pub fn of<I: SymbolIndex + ?Sized>(pin: &Pin, index: &I) -> Self {
        let namespace = pin.full_namespace();
        let mut entries: Vec<(String, ParamType)> = Vec::new();
        for tag in pin.docstring.tags(TagKind::Param) {
            let Some(name) = &tag.name else {
                continue;
            };
            if tag.types.is_empty() || entries.iter().any(|(n, _)| n == name) {
                continue;
            }
            let qualified = ComplexType::try_parse(&tag.types)
                .qualify(|n, c| index.qualify(n, c), &pin.context.namespace)
                .self_to(&namespace);
            entries.push((
                name.clone(),
                ParamType {
                    tagged: tag.tagged(),
                    qualified,
                },
            ));
        }
        ParamModel { entries }
    }

    /// The model of the first candidate that documents any parameter.
    ///
    /// Overridden or re-opened methods often carry the documentation on
    /// only one copy.
    pub fn first_of<I: SymbolIndex + ?Sized>(pins: &[&Pin], index: &I) -> Self {
        pins.iter()
            .map(|pin| ParamModel::of(pin, index))
            .find(|model| !model.is_empty())
            .unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&ParamType> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, ty)| ty)
    }

    /// The qualified type of `name`, if it is documented and resolved.
    pub fn declared(&self, name: &str) -> Option<&ComplexType> {
        self.get(name)
            .map(|ty| &ty.qualified)
            .filter(|ty| ty.is_defined())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamType)> {
        self.entries.iter().map(|(n, ty)| (n.as_str(), ty))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
