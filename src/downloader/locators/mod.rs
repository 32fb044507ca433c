// Payload locators - one per embedding convention TikTok has used
//
// Order matters: the extractor tries locators in turn and the first one
// that finds its marker wins. The newer `__NEXT_DATA__` convention comes
// first so a page carrying both markers resolves to it.

mod init_props;
mod next_data;

pub use init_props::InitPropsLocator;
pub use next_data::NextDataLocator;

use super::traits::PayloadLocator;

/// Locators in the order they should be tried
pub fn default_locators() -> Vec<Box<dyn PayloadLocator>> {
    vec![Box::new(NextDataLocator), Box::new(InitPropsLocator)]
}
