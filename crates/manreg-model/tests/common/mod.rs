#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use manreg_core::image::ImageGeometry;
use manreg_core::spatial::{Direction3, Point3, Spacing3, VoxelIndex};
use manreg_core::transform::AffineTransform3;
use manreg_model::{EventHistory, LayerId, LayerRegistry, LayerStack, ModelConfig, TransformParameterModel};

pub type Cursor = Cell<VoxelIndex<3>>;
pub type Model = TransformParameterModel<LayerStack, Cursor>;

/// 100x80x60 grid with 1x1x2 spacing; center voxel (50, 40, 30) sits at (50, 40, 60).
pub fn reference_geometry() -> ImageGeometry<3> {
    ImageGeometry::new(
        [100, 80, 60],
        Point3::origin(),
        Spacing3::new(1.0, 1.0, 2.0),
        Direction3::identity(),
    )
    .unwrap()
}

pub struct Fixture {
    pub stack: Rc<RefCell<LayerStack>>,
    pub cursor: Rc<Cursor>,
    pub model: Model,
    pub history: EventHistory,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(ModelConfig::default())
    }

    pub fn with_config(config: ModelConfig) -> Self {
        let mut stack = LayerStack::new();
        stack.set_reference("fixed", reference_geometry());
        let stack = Rc::new(RefCell::new(stack));
        let cursor = Rc::new(Cell::new(VoxelIndex::zeros()));
        let mut model = Model::with_config(Rc::clone(&stack), Rc::clone(&cursor), config).unwrap();
        let history = EventHistory::new();
        model.subscribe(Rc::new(history.clone()));
        Self { stack, cursor, model, history }
    }

    pub fn add_layer(&self, label: &str, transform: AffineTransform3) -> LayerId {
        self.stack.borrow_mut().add_layer(label, transform)
    }

    pub fn layer_transform(&self, id: LayerId) -> AffineTransform3 {
        self.stack.borrow().layer_transform(id).unwrap().transform
    }

    pub fn layer_stamp(&self, id: LayerId) -> u64 {
        self.stack.borrow().layer_transform(id).unwrap().timestamp
    }

    pub fn set_cursor(&self, index: [u32; 3]) {
        self.cursor.set(VoxelIndex::new(index));
    }
}
