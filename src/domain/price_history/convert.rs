//! Conversion: MarketChartResponse → Series (TryFrom + validation).

use super::wire::MarketChartResponse;
use super::{PricePoint, Series, SeriesValidationError};
use crate::shared::{AssetId, Granularity};

impl TryFrom<(AssetId, Granularity, MarketChartResponse)> for Series {
    type Error = SeriesValidationError;

    fn try_from(
        (asset_id, granularity, source): (AssetId, Granularity, MarketChartResponse),
    ) -> Result<Self, Self::Error> {
        let points = source
            .prices
            .into_iter()
            .enumerate()
            .map(|(index, pair)| match pair.as_slice() {
                [t, price, ..] if t.is_finite() => Ok(PricePoint {
                    timestamp: *t as i64,
                    price: *price,
                }),
                [_, _, ..] => Err(SeriesValidationError::InvalidTimestamp { index }),
                _ => Err(SeriesValidationError::MalformedPoint {
                    index,
                    len: pair.len(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Series::new(asset_id, granularity, points))
    }
}
