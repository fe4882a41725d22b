use cobrars_core::manipulation::boundary::{BoundaryError, BoundarySpec};
use cobrars_core::metabolic_model::metabolite::MetaboliteBuilder;
use cobrars_core::metabolic_model::model::{Model, ModelError};

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(err: BoundaryError) -> PyErr {
    match err {
        BoundaryError::Model(ModelError::MetaboliteNotFound { .. }) => {
            PyKeyError::new_err(err.to_string())
        }
        _ => PyValueError::new_err(err.to_string()),
    }
}

#[pyclass(name = "Model")]
struct PyModel {
    inner: Model,
}

#[pymethods]
impl PyModel {
    #[new]
    #[pyo3(signature = (id=None))]
    fn new(id: Option<String>) -> Self {
        let mut inner = Model::new_empty();
        inner.id = id;
        PyModel { inner }
    }

    #[pyo3(signature = (id, name=None, compartment=None))]
    fn add_metabolite(
        &mut self,
        id: String,
        name: Option<String>,
        compartment: Option<String>,
    ) -> PyResult<()> {
        let metabolite = MetaboliteBuilder::default()
            .id(id)
            .name(name)
            .compartment(compartment)
            .build()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        self.inner
            .add_metabolites(vec![metabolite])
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Add a boundary reaction for a metabolite already in the model, returning its id
    #[pyo3(signature = (metabolite_id, boundary_type="demand", bound=None, prefix=None))]
    fn add_boundary(
        &mut self,
        metabolite_id: &str,
        boundary_type: &str,
        bound: Option<f64>,
        prefix: Option<String>,
    ) -> PyResult<String> {
        let metabolite = self
            .inner
            .metabolites
            .get(metabolite_id)
            .cloned()
            .ok_or_else(|| PyKeyError::new_err(metabolite_id.to_string()))?;
        let mut spec = BoundarySpec::new(boundary_type.parse().map_err(to_py_err)?);
        if let Some(bound) = bound {
            spec.magnitude = bound;
        }
        spec.prefix = prefix;
        let reaction = self
            .inner
            .add_boundary(&metabolite, &spec)
            .map_err(to_py_err)?;
        Ok(reaction.id.clone())
    }

    fn reaction_bounds(&self, reaction_id: &str) -> PyResult<(f64, f64)> {
        self.inner
            .reactions
            .get(reaction_id)
            .map(|r| r.bounds())
            .ok_or_else(|| PyKeyError::new_err(reaction_id.to_string()))
    }

    fn reaction_ids(&self) -> Vec<String> {
        self.inner.reactions.keys().cloned().collect()
    }

    fn boundary_ids(&self) -> Vec<String> {
        self.inner
            .boundary_reactions()
            .map(|r| r.id.clone())
            .collect()
    }

    fn __len__(&self) -> usize {
        self.inner.reactions.len()
    }
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyModel>()?;
    Ok(())
}
